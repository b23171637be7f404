use serde::{Deserialize, Serialize};

use crate::bodies::BodySet;
use crate::chart::houses::HouseSystem;
use crate::ephemeris::{GeoLocation, NodeMode};
use crate::error::ChartError;
use crate::sidereal::{Ayanamsa, ZodiacMode};
use crate::time::CivilInstant;

/// Everything needed to compute one chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Civil date, `YYYY-MM-DD`
    pub date: String,
    /// Civil time, `HH:MM` or `HH:MM:SS`
    pub time: String,
    /// Fixed offset from UTC in hours (east positive)
    pub utc_offset_hours: f64,
    pub location: GeoLocation,
    #[serde(default)]
    pub house_system: HouseSystem,
    #[serde(default)]
    pub zodiac: ZodiacMode,
    #[serde(default)]
    pub ayanamsa: Ayanamsa,
    #[serde(default)]
    pub node_mode: NodeMode,
    /// Add Uranus, Neptune and Pluto to the roster
    #[serde(default)]
    pub outer_planets: bool,
    /// Correct body positions for parallax at `location`
    #[serde(default)]
    pub topocentric: bool,
}

impl ChartRequest {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        utc_offset_hours: f64,
        location: GeoLocation,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            utc_offset_hours,
            location,
            house_system: HouseSystem::default(),
            zodiac: ZodiacMode::default(),
            ayanamsa: Ayanamsa::default(),
            node_mode: NodeMode::default(),
            outer_planets: false,
            topocentric: false,
        }
    }

    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }

    pub fn sidereal(mut self, ayanamsa: Ayanamsa) -> Self {
        self.zodiac = ZodiacMode::Sidereal;
        self.ayanamsa = ayanamsa;
        self
    }

    pub fn with_node_mode(mut self, node_mode: NodeMode) -> Self {
        self.node_mode = node_mode;
        self
    }

    pub fn with_outer_planets(mut self, outer_planets: bool) -> Self {
        self.outer_planets = outer_planets;
        self
    }

    pub fn with_topocentric(mut self, topocentric: bool) -> Self {
        self.topocentric = topocentric;
        self
    }

    pub fn body_set(&self) -> BodySet {
        if self.outer_planets {
            BodySet::with_outer_planets()
        } else {
            BodySet::classical()
        }
    }

    /// Check every field; nothing is computed for an invalid request.
    pub fn validate(&self) -> Result<CivilInstant, ChartError> {
        self.location.validate()?;
        CivilInstant::parse(&self.date, &self.time, self.utc_offset_hours)
    }
}
