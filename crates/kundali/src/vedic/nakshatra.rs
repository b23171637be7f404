//! The 27 lunar mansions.
//!
//! Each nakshatra spans 13°20' (360/27 degrees) and is split into 4 padas.
//! Lords follow the Vimshottari order, repeating every 9 mansions.

use serde::Serialize;

use crate::angles::normalize;
use crate::bodies::Body;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / NAKSHATRA_COUNT as f64;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display name, lord)
pub const NAKSHATRA_ORDER: [(&str, &str, Body); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub lord: Body,
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

fn build_nakshatra_table() -> Vec<NakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(index, &(id, name, lord))| {
            let start = index as f64 * NAKSHATRA_SEGMENT_SIZE;
            NakshatraRecord {
                id,
                name,
                lord,
                index,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraRecord> = build_nakshatra_table();
}

/// Mansion index and degrees already traversed inside it.
///
/// Mansion `k` covers `[k * SEG, (k + 1) * SEG)` with the same start values
/// as the table, so a longitude on a boundary belongs to the later mansion
/// with zero progress.
pub fn nakshatra_position(longitude: f64) -> (usize, f64) {
    let lon = normalize(longitude);
    let mut index = ((lon / NAKSHATRA_SEGMENT_SIZE) as usize).min(NAKSHATRA_COUNT - 1);
    if index > 0 && lon < index as f64 * NAKSHATRA_SEGMENT_SIZE {
        index -= 1;
    } else if index + 1 < NAKSHATRA_COUNT && lon >= (index + 1) as f64 * NAKSHATRA_SEGMENT_SIZE {
        index += 1;
    }
    let position = (lon - index as f64 * NAKSHATRA_SEGMENT_SIZE).max(0.0);
    (index, position)
}

/// Index 0-26 of the mansion containing `longitude`.
pub fn nakshatra_index(longitude: f64) -> usize {
    nakshatra_position(longitude).0
}

/// Fraction of the mansion already traversed, in [0, 1).
pub fn nakshatra_progress(longitude: f64) -> f64 {
    let (_, position) = nakshatra_position(longitude);
    (position / NAKSHATRA_SEGMENT_SIZE).clamp(0.0, 1.0)
}

pub fn nakshatra(index: usize) -> &'static NakshatraRecord {
    &NAKSHATRA_TABLE[index % NAKSHATRA_COUNT]
}

/// Position of a longitude within its mansion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraPlacement {
    pub nakshatra: &'static NakshatraRecord,
    pub progress: f64,
    /// 1-4
    pub pada: u8,
}

pub fn placement_for_longitude(longitude: f64) -> NakshatraPlacement {
    let (index, offset) = nakshatra_position(longitude);
    let pada = ((offset / PADA_SIZE) as u8 + 1).min(4);
    NakshatraPlacement {
        nakshatra: nakshatra(index),
        progress: (offset / NAKSHATRA_SEGMENT_SIZE).clamp(0.0, 1.0),
        pada,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lords_cycle() {
        assert_eq!(nakshatra(0).lord, Body::Ketu);
        assert_eq!(nakshatra(9).lord, Body::Ketu);
        assert_eq!(nakshatra(26).name, "Revati");
        for i in 0..9 {
            assert_eq!(nakshatra(i).lord, nakshatra(i + 18).lord);
        }
    }

    #[test]
    fn test_placement() {
        let p = placement_for_longitude(0.0);
        assert_eq!(p.nakshatra.id, "ashwini");
        assert_eq!(p.pada, 1);

        // Middle of Rohini, third pada
        let lon = 3.0 * NAKSHATRA_SEGMENT_SIZE + 2.5 * PADA_SIZE;
        let p = placement_for_longitude(lon);
        assert_eq!(p.nakshatra.name, "Rohini");
        assert_eq!(p.pada, 3);
        assert!((p.progress - 0.625).abs() < 1e-9);
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(nakshatra_index(359.999_999_9), 26);
        assert_eq!(nakshatra_index(-0.1), 26);
        assert_eq!(nakshatra_index(360.0), 0);
    }

    #[test]
    fn test_boundary_starts_next_mansion() {
        for k in 0..NAKSHATRA_COUNT {
            let lon = k as f64 * NAKSHATRA_SEGMENT_SIZE;
            assert_eq!(nakshatra_index(lon), k, "lon {}", lon);
            assert_eq!(nakshatra_progress(lon), 0.0, "lon {}", lon);

            let p = placement_for_longitude(lon);
            assert_eq!(p.nakshatra.index, k);
            assert_eq!(p.pada, 1);
            assert_eq!(p.progress, 0.0);
        }
    }
}
