use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::chart::houses::HouseSystem;
use crate::sidereal::ZodiacMode;

/// A field the engine could not compute, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartWarning {
    BodyUnavailable { body: Body, reason: String },
    /// Rahu and Ketu are always unknown together.
    NodesUnavailable { reason: String },
    AnglesUnavailable { reason: String },
    /// Sidereal mode was requested; longitudes are tropical.
    SiderealDegraded { reason: String },
}

/// Immutable result of one chart computation.
///
/// Every known angle is in [0, 360). `None` marks a value the provider could
/// not supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub jd_ut: f64,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub utc: String,
    pub zodiac: ZodiacMode,
    pub house_system: HouseSystem,
    /// Body positions corrected for parallax at the observer
    #[serde(default)]
    pub topocentric: bool,
    /// Degrees subtracted from tropical longitudes, if any
    pub ayanamsa: Option<f64>,
    pub sidereal_degraded: bool,
    /// Roster order, nodes last
    pub roster: Vec<Body>,
    pub longitudes: BTreeMap<Body, Option<f64>>,
    /// Degrees per day; negative means retrograde
    pub speeds: BTreeMap<Body, Option<f64>>,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
    pub cusps: Option<[f64; 12]>,
    pub warnings: Vec<ChartWarning>,
}

impl ChartSnapshot {
    pub fn longitude(&self, body: Body) -> Option<f64> {
        self.longitudes.get(&body).copied().flatten()
    }

    pub fn speed(&self, body: Body) -> Option<f64> {
        self.speeds.get(&body).copied().flatten()
    }

    pub fn is_retrograde(&self, body: Body) -> Option<bool> {
        self.speed(body).map(|s| s < 0.0)
    }

    /// Bodies in roster order with their known longitudes
    pub fn known_bodies(&self) -> impl Iterator<Item = (Body, f64)> + '_ {
        self.roster
            .iter()
            .filter_map(|&b| self.longitude(b).map(|lon| (b, lon)))
    }

    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}
