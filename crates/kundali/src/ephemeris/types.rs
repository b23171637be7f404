use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Geographic location of the observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    /// Metres above sea level
    #[serde(default)]
    pub elevation: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ChartError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", self.lat),
            ));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(ChartError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", self.lon),
            ));
        }
        if !self.elevation.is_finite() {
            return Err(ChartError::invalid("elevation", "must be a finite number"));
        }
        Ok(())
    }
}

/// Raw position returned by a provider, before any sidereal correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Distance from the Earth's centre in AU, when the provider knows it
    #[serde(default)]
    pub distance_au: Option<f64>,
}

impl BodyPosition {
    pub fn new(lon: f64, speed_lon: f64) -> Self {
        Self {
            lon,
            lat: 0.0,
            speed_lon,
            distance_au: None,
        }
    }

    pub fn with_latitude(mut self, lat: f64) -> Self {
        self.lat = lat;
        self
    }

    pub fn with_distance(mut self, distance_au: f64) -> Self {
        self.distance_au = Some(distance_au);
        self
    }

    pub fn retrograde(&self) -> bool {
        self.speed_lon < 0.0
    }
}

/// Ascendant, midheaven and the provider's 12 cusps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub cusps: [f64; 12],
}

/// Which lunar node the provider reports as Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    /// Mean node: smooth polynomial motion only.
    Mean,
    /// True (osculating) node.
    #[default]
    True,
}

impl NodeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "mean" => Some(Self::Mean),
            "true" | "osculating" => Some(Self::True),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_bounds() {
        assert!(GeoLocation::new(19.076, 72.8777).validate().is_ok());
        assert!(GeoLocation::new(90.0, -180.0).validate().is_ok());
        assert!(GeoLocation::new(90.5, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, 181.0).validate().is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_node_mode_names() {
        assert_eq!(NodeMode::from_name("Mean"), Some(NodeMode::Mean));
        assert_eq!(NodeMode::from_name("true"), Some(NodeMode::True));
        assert_eq!(NodeMode::from_name("south"), None);
    }

    #[test]
    fn test_retrograde_flag() {
        assert!(BodyPosition::new(10.0, -0.2).retrograde());
        assert!(!BodyPosition::new(10.0, 0.0).retrograde());
    }
}
