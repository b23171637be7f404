//! Vimshottari mahadasha timeline.
//!
//! Periods are ruled by planets in a fixed 120-year cycle that starts at the
//! lord of the Moon's nakshatra. The first period is only the balance left
//! when the Moon has already traversed part of its mansion.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::chart::ChartSnapshot;
use crate::vedic::nakshatra::{nakshatra_index, nakshatra_progress};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

pub const VIMSHOTTARI_SEQUENCE: [(Body, f64); 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub ruler: Body,
    pub period_years: f64,
    /// Years from birth to the start of this period
    pub cumulative_offset_years: f64,
}

/// A period pinned to calendar instants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedDashaPeriod {
    pub ruler: Body,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "durationDays")]
    pub duration_days: f64,
}

impl DashaPeriod {
    pub fn end_offset_years(&self) -> f64 {
        self.cumulative_offset_years + self.period_years
    }

    pub fn dated(&self, birth: DateTime<Utc>) -> DatedDashaPeriod {
        DatedDashaPeriod {
            ruler: self.ruler,
            start: birth + years_to_duration(self.cumulative_offset_years),
            end: birth + years_to_duration(self.end_offset_years()),
            duration_days: self.period_years * VIMSHOTTARI_YEAR_DAYS,
        }
    }

    /// The nine sub-periods, starting at this period's own ruler, each
    /// `period_years * canonical / 120` long.
    pub fn antardashas(&self) -> Vec<DashaPeriod> {
        let start = sequence_index(self.ruler);
        let mut offset = self.cumulative_offset_years;
        (0..VIMSHOTTARI_SEQUENCE.len())
            .map(|i| {
                let (ruler, years) = VIMSHOTTARI_SEQUENCE[(start + i) % VIMSHOTTARI_SEQUENCE.len()];
                let period_years = self.period_years * years / VIMSHOTTARI_TOTAL_YEARS;
                let period = DashaPeriod {
                    ruler,
                    period_years,
                    cumulative_offset_years: offset,
                };
                offset += period_years;
                period
            })
            .collect()
    }
}

fn years_to_duration(years: f64) -> Duration {
    Duration::milliseconds((years * VIMSHOTTARI_YEAR_DAYS * 86_400_000.0).round() as i64)
}

fn sequence_index(ruler: Body) -> usize {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(b, _)| *b == ruler)
        .unwrap_or(0)
}

pub fn canonical_years(ruler: Body) -> Option<f64> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(b, _)| *b == ruler)
        .map(|(_, years)| *years)
}

/// The nine mahadashas from birth; `None` if the Moon is unknown.
pub fn vimshottari(moon: Option<f64>) -> Option<Vec<DashaPeriod>> {
    let moon = moon?;
    let start = nakshatra_index(moon) % VIMSHOTTARI_SEQUENCE.len();
    let elapsed = nakshatra_progress(moon);

    let mut offset = 0.0;
    let periods = (0..VIMSHOTTARI_SEQUENCE.len())
        .map(|i| {
            let (ruler, years) = VIMSHOTTARI_SEQUENCE[(start + i) % VIMSHOTTARI_SEQUENCE.len()];
            let period_years = if i == 0 { (1.0 - elapsed) * years } else { years };
            let period = DashaPeriod {
                ruler,
                period_years,
                cumulative_offset_years: offset,
            };
            offset += period_years;
            period
        })
        .collect();
    Some(periods)
}

pub fn compute_vimshottari(snapshot: &ChartSnapshot) -> Option<Vec<DashaPeriod>> {
    vimshottari(snapshot.longitude(Body::Moon))
}
