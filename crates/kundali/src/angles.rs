//! Angle helpers shared by every chart computation.
//!
//! All longitudes are ecliptic degrees. Anything that leaves this module has
//! been reduced to [0, 360).

use serde::{Deserialize, Serialize};

pub const SIGN_SPAN: f64 = 30.0;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Normalize degrees to [0, 360), including negative input.
pub fn normalize(value: f64) -> f64 {
    let reduced = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Zodiac sign index 0 (Aries) ..= 11 (Pisces).
pub fn sign_index(longitude: f64) -> usize {
    ((normalize(longitude) / SIGN_SPAN) as usize).min(11)
}

pub fn sign_name(longitude: f64) -> &'static str {
    SIGN_NAMES[sign_index(longitude)]
}

/// Degree / minute / second decomposition of a normalized angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub deg: u32,
    pub min: u32,
    pub sec: u32,
}

/// Truncating cascade: whole degrees, minutes of the remainder, seconds of that.
pub fn degrees_minutes_seconds(angle: f64) -> Dms {
    let angle = normalize(angle);
    let deg = angle.trunc();
    let rem = (angle - deg) * 60.0;
    let min = rem.trunc();
    let sec = ((rem - min) * 60.0).trunc();
    Dms {
        deg: deg as u32,
        min: (min as u32).min(59),
        sec: (sec as u32).min(59),
    }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn min_angular_separation(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Project a longitude onto the diagram plane.
///
/// The plane is mathematical (Y up). `reference` is placed at 180°, the left
/// of the wheel, which is where the ascendant sits on a radix chart, and
/// longitude increases counter-clockwise from there. Renderers with a Y-down
/// raster must negate `y`.
pub fn project_to_plane(angle: f64, radius: f64, reference: f64) -> (f64, f64) {
    let theta = (180.0 + angle - reference).to_radians();
    (radius * theta.cos(), radius * theta.sin())
}
