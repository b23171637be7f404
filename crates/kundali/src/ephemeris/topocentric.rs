//! Diurnal parallax.
//!
//! Moves a geocentric ecliptic position of date to the observer's place on
//! the Earth's surface. The observer vector is built from local sidereal time
//! and geocentric latitude, rotated into the ecliptic and subtracted.

use crate::angles::normalize;
use crate::ephemeris::types::{BodyPosition, GeoLocation};
use crate::sidereal::{DAYS_PER_CENTURY, J2000_JD};

/// Equatorial horizontal parallax at 1 AU (8.794″), degrees
const SOLAR_PARALLAX_DEG: f64 = 8.794 / 3600.0;
/// Polar over equatorial Earth radius
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;
const EARTH_RADIUS_M: f64 = 6_378_140.0;

/// Greenwich mean sidereal time in degrees, [0, 360).
///
/// Earth rotation angle plus the Capitaine et al. 2003 polynomial. UT stands
/// in for UT1.
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let era = 360.0 * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du).rem_euclid(1.0);
    let t = du / DAYS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t3 * t
        - 0.0000000368 * t3 * t2;
    normalize(era + poly_arcsec / 3600.0)
}

/// IAU 2006 mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    (84_381.406 - 46.836_769 * t - 0.000_183_1 * t * t + 0.002_003_40 * t * t * t) / 3600.0
}

/// ρ·sin φ′ and ρ·cos φ′ in equatorial radii
fn observer_terms(observer: &GeoLocation) -> (f64, f64) {
    let phi = observer.lat.to_radians();
    let u = (EARTH_AXIS_RATIO * phi.tan()).atan();
    let h = observer.elevation / EARTH_RADIUS_M;
    (
        EARTH_AXIS_RATIO * u.sin() + h * phi.sin(),
        u.cos() + h * phi.cos(),
    )
}

/// Topocentric version of `pos`, or `None` when it carries no distance.
///
/// Longitude, latitude and distance change; the geocentric speed is kept.
pub fn topocentric_position(
    pos: &BodyPosition,
    jd_ut: f64,
    observer: &GeoLocation,
) -> Option<BodyPosition> {
    let distance = pos.distance_au.filter(|d| d.is_finite() && *d > 0.0)?;
    let sin_pi = SOLAR_PARALLAX_DEG.to_radians().sin() / distance;
    let (rho_sin, rho_cos) = observer_terms(observer);
    let theta = (gmst_deg(jd_ut) + observer.lon).to_radians();
    let eps = mean_obliquity_deg(jd_ut).to_radians();
    let (lam, beta) = (pos.lon.to_radians(), pos.lat.to_radians());

    // Body minus observer, in units of the geocentric distance
    let x = lam.cos() * beta.cos() - sin_pi * rho_cos * theta.cos();
    let y = lam.sin() * beta.cos()
        - sin_pi * (rho_sin * eps.sin() + rho_cos * eps.cos() * theta.sin());
    let z = beta.sin() - sin_pi * (rho_sin * eps.cos() - rho_cos * eps.sin() * theta.sin());

    Some(BodyPosition {
        lon: normalize(y.atan2(x).to_degrees()),
        lat: z.atan2(x.hypot(y)).to_degrees(),
        speed_lon: pos.speed_lon,
        distance_au: Some(distance * (x * x + y * y + z * z).sqrt()),
    })
}
