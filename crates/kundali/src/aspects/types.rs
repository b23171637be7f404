use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::error::ChartError;

/// One classification the detector tests every pair against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    /// Aspect name: "conjunction", "trine", etc.
    pub name: String,
    /// Exact angle in degrees (0-180)
    pub angle: f64,
    /// Allowed deviation from the exact angle
    pub orb: f64,
    /// Display weight used by renderers
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl AspectDefinition {
    pub fn new(name: impl Into<String>, angle: f64, orb: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            angle,
            orb,
            weight,
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.name.trim().is_empty() {
            return Err(ChartError::invalid("aspect", "definition without a name"));
        }
        if !self.angle.is_finite() || !(0.0..=180.0).contains(&self.angle) {
            return Err(ChartError::invalid(
                "aspect",
                format!("{}: angle {} is outside [0, 180]", self.name, self.angle),
            ));
        }
        if !self.orb.is_finite() || self.orb < 0.0 {
            return Err(ChartError::invalid(
                "aspect",
                format!("{}: orb {} must be finite and non-negative", self.name, self.orb),
            ));
        }
        Ok(())
    }
}

/// What to keep when a pair falls inside more than one orb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Record every matching definition.
    #[default]
    All,
    /// Keep only the match with the smallest deviation.
    Closest,
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    pub definitions: Vec<AspectDefinition>,
    /// Include Rahu and Ketu in planet pairs
    #[serde(default)]
    pub include_nodes: bool,
    #[serde(default)]
    pub policy: MatchPolicy,
}

impl AspectSettings {
    pub fn new(definitions: Vec<AspectDefinition>) -> Self {
        Self {
            definitions,
            include_nodes: false,
            policy: MatchPolicy::All,
        }
    }

    pub fn with_nodes(mut self, include_nodes: bool) -> Self {
        self.include_nodes = include_nodes;
        self
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        self.definitions.iter().try_for_each(AspectDefinition::validate)
    }
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self::new(vec![
            AspectDefinition::new("conjunction", 0.0, 8.0, 1.0),
            AspectDefinition::new("opposition", 180.0, 8.0, 0.9),
            AspectDefinition::new("trine", 120.0, 7.0, 0.8),
            AspectDefinition::new("square", 90.0, 6.0, 0.8),
            AspectDefinition::new("sextile", 60.0, 4.0, 0.6),
        ])
    }
}

/// A detected aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    /// Earlier body in roster order
    pub body_a: Body,
    pub body_b: Body,
    /// Shortest angular distance (0-180)
    pub separation: f64,
    pub name: String,
    pub exact_angle: f64,
    /// Orb allowed by the matched definition
    pub orb: f64,
    pub weight: f64,
    /// |separation - exact_angle|
    pub deviation: f64,
    /// Within 0.1 degrees of exact
    pub exact: bool,
    /// Tightening rather than separating; unknown without both speeds
    pub applying: Option<bool>,
}

/// Result of matching a single pair, before the bodies are attached
#[derive(Debug, Clone, PartialEq)]
pub struct AspectMatch {
    pub separation: f64,
    pub definition: AspectDefinition,
    pub deviation: f64,
    pub exact: bool,
    pub applying: Option<bool>,
}

impl AspectMatch {
    pub fn between(self, body_a: Body, body_b: Body) -> Aspect {
        Aspect {
            body_a,
            body_b,
            separation: self.separation,
            name: self.definition.name,
            exact_angle: self.definition.angle,
            orb: self.definition.orb,
            weight: self.definition.weight,
            deviation: self.deviation,
            exact: self.exact,
            applying: self.applying,
        }
    }
}
