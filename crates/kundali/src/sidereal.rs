//! Tropical to sidereal correction.
//!
//! The ayanamsa is the angle between the vernal equinox and the sidereal
//! zero point. Each system is a J2000.0 reference value; the value at any
//! other epoch adds the IAU 2006 general precession in longitude.

use serde::{Deserialize, Serialize};

use crate::ephemeris::EphemerisProvider;
use crate::error::EphemerisError;

pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Validity window of the precession polynomial, years -3000 to +7000.
pub const MODEL_MIN_JD: f64 = 625_673.5;
pub const MODEL_MAX_JD: f64 = 4_277_413.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacMode {
    #[default]
    Tropical,
    Sidereal,
}

impl ZodiacMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Sidereal => "sidereal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "tropical" => Some(Self::Tropical),
            "sidereal" => Some(Self::Sidereal),
            _ => None,
        }
    }
}

/// Sidereal reference systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    /// Chitrapaksha: Spica at 0° Libra.
    #[default]
    Lahiri,
    Raman,
    Krishnamurti,
    FaganBradley,
    Yukteshwar,
}

impl Ayanamsa {
    pub const ALL: [Ayanamsa; 5] = [
        Ayanamsa::Lahiri,
        Ayanamsa::Raman,
        Ayanamsa::Krishnamurti,
        Ayanamsa::FaganBradley,
        Ayanamsa::Yukteshwar,
    ];

    /// Reference ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.853,
            Self::Raman => 22.370,
            Self::Krishnamurti => 23.850,
            Self::FaganBradley => 24.736,
            Self::Yukteshwar => 22.376,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
            Self::Raman => "raman",
            Self::Krishnamurti => "krishnamurti",
            Self::FaganBradley => "fagan_bradley",
            Self::Yukteshwar => "yukteshwar",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        match name.as_str() {
            "chitrapaksha" => Some(Self::Lahiri),
            "kp" => Some(Self::Krishnamurti),
            _ => Self::ALL.iter().copied().find(|a| a.name() == name),
        }
    }
}

/// IAU 2006 general precession in ecliptic longitude, in arcseconds.
///
/// `t` is Julian centuries since J2000.0.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Mean ayanamsa in degrees for a Julian Day (UT).
pub fn mean_ayanamsa(jd_ut: f64, system: Ayanamsa) -> Result<f64, EphemerisError> {
    if !jd_ut.is_finite() || !(MODEL_MIN_JD..=MODEL_MAX_JD).contains(&jd_ut) {
        return Err(EphemerisError::CorrectionUnavailable {
            jd_ut,
            message: format!(
                "precession model covers JD {} to {}",
                MODEL_MIN_JD, MODEL_MAX_JD
            ),
        });
    }
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    Ok(system.reference_j2000_deg() + general_precession_arcsec(t) / 3600.0)
}

/// The correction actually applied to one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SiderealCorrection {
    /// Degrees subtracted from every tropical longitude.
    pub degrees: f64,
    /// Sidereal mode was requested but the ayanamsa could not be resolved.
    pub degraded: bool,
    pub failure: Option<EphemerisError>,
}

impl SiderealCorrection {
    pub fn none() -> Self {
        Self {
            degrees: 0.0,
            degraded: false,
            failure: None,
        }
    }

    /// Resolve the correction for a chart. A failed lookup falls back to zero
    /// and marks the result degraded.
    pub fn resolve<P: EphemerisProvider + ?Sized>(
        provider: &P,
        jd_ut: f64,
        zodiac: ZodiacMode,
        system: Ayanamsa,
    ) -> Self {
        if zodiac == ZodiacMode::Tropical {
            return Self::none();
        }
        match provider.ayanamsa(jd_ut, system) {
            Ok(degrees) if degrees.is_finite() => Self {
                degrees,
                degraded: false,
                failure: None,
            },
            Ok(degrees) => Self::degraded(EphemerisError::CorrectionUnavailable {
                jd_ut,
                message: format!("provider returned {}", degrees),
            }),
            Err(e) => Self::degraded(e),
        }
    }

    fn degraded(failure: EphemerisError) -> Self {
        log::warn!("sidereal correction unavailable, using tropical longitudes: {}", failure);
        Self {
            degrees: 0.0,
            degraded: true,
            failure: Some(failure),
        }
    }

    /// Degrees actually applied, `None` when no sidereal correction took place.
    pub fn applied(&self, zodiac: ZodiacMode) -> Option<f64> {
        (zodiac == ZodiacMode::Sidereal && !self.degraded).then_some(self.degrees)
    }
}
