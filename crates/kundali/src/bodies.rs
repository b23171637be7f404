use serde::{Deserialize, Serialize};
use std::fmt;

/// Celestial bodies a chart can carry, in roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Rahu,
    Ketu,
}

impl Body {
    pub const CLASSICAL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub const OUTER: [Body; 3] = [Body::Uranus, Body::Neptune, Body::Pluto];

    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Rahu => "rahu",
            Body::Ketu => "ketu",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        }
    }

    /// Rahu and Ketu are derived from the node query, never looked up directly.
    pub fn is_node(self) -> bool {
        matches!(self, Body::Rahu | Body::Ketu)
    }

    pub fn from_id(id: &str) -> Option<Body> {
        let id = id.to_lowercase();
        ALL_BODIES.iter().copied().find(|b| b.id() == id)
    }
}

const ALL_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Rahu,
    Body::Ketu,
];

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered roster of bodies computed for one chart.
///
/// The roster always ends with Rahu and Ketu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// Seven classical planets plus the nodes.
    pub fn classical() -> Self {
        let mut bodies = Body::CLASSICAL.to_vec();
        bodies.extend([Body::Rahu, Body::Ketu]);
        Self { bodies }
    }

    pub fn with_outer_planets() -> Self {
        let mut bodies = Body::CLASSICAL.to_vec();
        bodies.extend(Body::OUTER);
        bodies.extend([Body::Rahu, Body::Ketu]);
        Self { bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Bodies that are queried one by one from the provider.
    pub fn planets(&self) -> impl Iterator<Item = Body> + '_ {
        self.bodies.iter().copied().filter(|b| !b.is_node())
    }
}

impl Default for BodySet {
    fn default() -> Self {
        Self::classical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_order() {
        let set = BodySet::classical();
        assert_eq!(set.bodies().len(), 9);
        assert_eq!(set.bodies()[0], Body::Sun);
        assert_eq!(set.bodies()[8], Body::Ketu);
        assert_eq!(set.planets().count(), 7);

        let outer = BodySet::with_outer_planets();
        assert_eq!(outer.bodies().len(), 12);
        assert_eq!(outer.planets().last(), Some(Body::Pluto));
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Body::from_id("Jupiter"), Some(Body::Jupiter));
        assert_eq!(Body::from_id("ketu"), Some(Body::Ketu));
        assert_eq!(Body::from_id("chiron"), None);
    }
}
