use std::collections::BTreeMap;

use crate::bodies::Body;
use crate::chart::HouseSystem;
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{BodyPosition, GeoLocation, HouseAngles, NodeMode};
use crate::error::EphemerisError;
use crate::sidereal::{self, Ayanamsa};

/// Table-driven provider that replays recorded positions.
///
/// The same values are returned for every instant and location. Anything that
/// was not set fails with [`EphemerisError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct StaticEphemeris {
    bodies: BTreeMap<Body, BodyPosition>,
    node: Option<BodyPosition>,
    angles: Option<HouseAngles>,
    ayanamsa: AyanamsaSource,
}

#[derive(Debug, Clone, Copy, Default)]
enum AyanamsaSource {
    #[default]
    Model,
    Fixed(f64),
    Missing,
}

impl StaticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Body, lon: f64, speed_lon: f64) -> Self {
        self.bodies.insert(body, BodyPosition::new(lon, speed_lon));
        self
    }

    pub fn with_body_position(mut self, body: Body, position: BodyPosition) -> Self {
        self.bodies.insert(body, position);
        self
    }

    pub fn with_node(mut self, lon: f64, speed_lon: f64) -> Self {
        self.node = Some(BodyPosition::new(lon, speed_lon));
        self
    }

    /// Ascendant and midheaven with equal 30° cusps counted from the ascendant.
    pub fn with_angles(self, ascendant: f64, midheaven: f64) -> Self {
        let cusps = std::array::from_fn(|i| ascendant + 30.0 * i as f64);
        self.with_house_angles(HouseAngles {
            ascendant,
            midheaven,
            cusps,
        })
    }

    pub fn with_house_angles(mut self, angles: HouseAngles) -> Self {
        self.angles = Some(angles);
        self
    }

    pub fn with_fixed_ayanamsa(mut self, degrees: f64) -> Self {
        self.ayanamsa = AyanamsaSource::Fixed(degrees);
        self
    }

    /// Make every ayanamsa lookup fail.
    pub fn without_ayanamsa(mut self) -> Self {
        self.ayanamsa = AyanamsaSource::Missing;
        self
    }
}

impl EphemerisProvider for StaticEphemeris {
    fn body_position(
        &self,
        jd_ut: f64,
        _observer: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::unavailable(body.id(), jd_ut, "no recorded position"))
    }

    fn node_position(
        &self,
        jd_ut: f64,
        _observer: &GeoLocation,
        _mode: NodeMode,
    ) -> Result<BodyPosition, EphemerisError> {
        self.node
            .ok_or_else(|| EphemerisError::unavailable("rahu", jd_ut, "no recorded node"))
    }

    fn house_angles(
        &self,
        jd_ut: f64,
        _observer: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        self.angles.ok_or_else(|| {
            EphemerisError::unavailable(
                format!("houses ({})", system.name()),
                jd_ut,
                "no recorded angles",
            )
        })
    }

    fn ayanamsa(&self, jd_ut: f64, system: Ayanamsa) -> Result<f64, EphemerisError> {
        match self.ayanamsa {
            AyanamsaSource::Model => sidereal::mean_ayanamsa(jd_ut, system),
            AyanamsaSource::Fixed(degrees) => Ok(degrees),
            AyanamsaSource::Missing => Err(EphemerisError::CorrectionUnavailable {
                jd_ut,
                message: "ayanamsa disabled for this provider".to_string(),
            }),
        }
    }
}
