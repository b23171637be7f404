//! Lunar-calendar indices from the Sun and Moon longitudes.

use serde::{Deserialize, Serialize};

use crate::angles::normalize;
use crate::bodies::Body;
use crate::chart::ChartSnapshot;
use crate::vedic::nakshatra::{nakshatra, nakshatra_index, NAKSHATRA_COUNT, NAKSHATRA_SEGMENT_SIZE};

/// Degrees of Moon-Sun elongation per tithi
pub const TITHI_SPAN: f64 = 12.0;
pub const TITHI_COUNT: u8 = 30;
pub const YOGA_COUNT: u8 = 27;
pub const KARANA_COUNT: u8 = 11;

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha", "Priti", "Ayushman", "Saubhagya", "Shobhana", "Atiganda", "Sukarma",
    "Dhriti", "Shula", "Ganda", "Vriddhi", "Dhruva", "Vyaghata", "Harshana", "Vajra",
    "Siddhi", "Vyatipata", "Variyan", "Parigha", "Shiva", "Siddha", "Sadhya", "Shubha",
    "Shukla", "Brahma", "Indra", "Vaidhriti",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paksha {
    /// Waxing
    Shukla,
    /// Waning
    Krishna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanchangResult {
    /// 0-29
    pub tithi: u8,
    /// 0-26
    pub nakshatra: u8,
    /// 0-26
    pub yoga: u8,
    /// 0-10
    pub karana: u8,
}

impl PanchangResult {
    pub fn paksha(&self) -> Paksha {
        if self.tithi < TITHI_COUNT / 2 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    /// Day of the fortnight, 1-15
    pub fn tithi_in_paksha(&self) -> u8 {
        self.tithi % (TITHI_COUNT / 2) + 1
    }

    pub fn nakshatra_name(&self) -> &'static str {
        nakshatra(self.nakshatra as usize).name
    }

    pub fn yoga_name(&self) -> &'static str {
        YOGA_NAMES[(self.yoga as usize).min(YOGA_NAMES.len() - 1)]
    }
}

/// Panchang for a Sun/Moon pair; `None` unless both are known.
pub fn panchang_from_longitudes(sun: Option<f64>, moon: Option<f64>) -> Option<PanchangResult> {
    let sun = normalize(sun?);
    let moon = normalize(moon?);

    let elongation = normalize(moon - sun);
    let tithi = ((elongation / TITHI_SPAN) as u8).min(TITHI_COUNT - 1);
    let nakshatra = nakshatra_index(moon).min(NAKSHATRA_COUNT - 1) as u8;
    let yoga = ((normalize(sun + moon) / NAKSHATRA_SEGMENT_SIZE) as u8).min(YOGA_COUNT - 1);
    let karana = (tithi * 2) % KARANA_COUNT;

    Some(PanchangResult {
        tithi,
        nakshatra,
        yoga,
        karana,
    })
}

pub fn compute_panchang(snapshot: &ChartSnapshot) -> Option<PanchangResult> {
    panchang_from_longitudes(snapshot.longitude(Body::Sun), snapshot.longitude(Body::Moon))
}
