//! House systems and the cusp strategy behind each of them.

use serde::{Deserialize, Serialize};

use crate::angles::{normalize, sign_index, SIGN_SPAN};
use crate::ephemeris::HouseAngles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Placidus,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
    Porphyry,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("placidus", HouseSystem::Placidus, b'P'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
    ("porphyry", HouseSystem::Porphyry, b'O'),
];

impl HouseSystem {
    fn entry(self) -> &'static (&'static str, HouseSystem, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Swiss Ephemeris house-system letter
    pub fn code(self) -> u8 {
        self.entry().2
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, system, _)| *system)
    }

    pub fn valid_names() -> Vec<&'static str> {
        HOUSE_SYSTEMS.iter().map(|(n, _, _)| *n).collect()
    }

    pub fn strategy(self) -> &'static dyn HouseStrategy {
        match self {
            HouseSystem::WholeSign => &WholeSignHouses,
            _ => &ProviderHouses,
        }
    }
}

/// Produces the 12 cusps of a chart from its (already corrected) angles.
pub trait HouseStrategy {
    fn cusps(&self, angles: &HouseAngles) -> [f64; 12];
}

/// Sign boundaries counted from the ascendant's sign.
pub struct WholeSignHouses;

impl HouseStrategy for WholeSignHouses {
    fn cusps(&self, angles: &HouseAngles) -> [f64; 12] {
        let first = sign_index(angles.ascendant);
        std::array::from_fn(|i| SIGN_SPAN * ((first + i) % 12) as f64)
    }
}

/// Cusps exactly as the provider computed them.
pub struct ProviderHouses;

impl HouseStrategy for ProviderHouses {
    fn cusps(&self, angles: &HouseAngles) -> [f64; 12] {
        angles.cusps.map(normalize)
    }
}
