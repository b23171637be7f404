//! Flat records for tables and CSV-like output.
//!
//! Every field is a primitive so a row serializes without nesting.

use serde::Serialize;

use crate::angles::{degrees_minutes_seconds, sign_index, SIGN_NAMES};
use crate::aspects::Aspect;
use crate::chart::ChartSnapshot;
use crate::vedic::{DashaPeriod, PanchangResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow {
    pub body: &'static str,
    pub longitude: f64,
    pub sign_index: usize,
    pub sign: &'static str,
    pub deg: u32,
    pub min: u32,
    pub sec: u32,
    pub speed: Option<f64>,
    pub retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRow {
    pub body_a: &'static str,
    pub body_b: &'static str,
    pub separation: f64,
    pub aspect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaRow {
    pub ruler: &'static str,
    pub years: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangRow {
    pub tithi: u8,
    pub nakshatra: u8,
    pub yoga: u8,
    pub karana: u8,
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// One row per known body, in roster order.
pub fn position_rows(snapshot: &ChartSnapshot) -> Vec<PositionRow> {
    snapshot
        .known_bodies()
        .map(|(body, lon)| {
            let dms = degrees_minutes_seconds(lon);
            let sign = sign_index(lon);
            let speed = snapshot.speed(body);
            PositionRow {
                body: body.display_name(),
                longitude: round6(lon),
                sign_index: sign,
                sign: SIGN_NAMES[sign],
                deg: dms.deg,
                min: dms.min,
                sec: dms.sec,
                speed,
                retrograde: speed.is_some_and(|s| s < 0.0),
            }
        })
        .collect()
}

pub fn aspect_rows(aspects: &[Aspect]) -> Vec<AspectRow> {
    aspects
        .iter()
        .map(|a| AspectRow {
            body_a: a.body_a.display_name(),
            body_b: a.body_b.display_name(),
            separation: a.separation,
            aspect: a.name.clone(),
        })
        .collect()
}

pub fn dasha_rows(periods: &[DashaPeriod]) -> Vec<DashaRow> {
    periods
        .iter()
        .map(|p| DashaRow {
            ruler: p.ruler.display_name(),
            years: p.period_years,
            offset: p.cumulative_offset_years,
        })
        .collect()
}

pub fn panchang_row(panchang: &PanchangResult) -> PanchangRow {
    PanchangRow {
        tithi: panchang.tithi,
        nakshatra: panchang.nakshatra,
        yoga: panchang.yoga,
        karana: panchang.karana,
    }
}
