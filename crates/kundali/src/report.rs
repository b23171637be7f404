//! The single "Generate" operation: snapshot plus every derivation.

use serde::{Deserialize, Serialize};

use crate::aspects::{Aspect, AspectCalculator, AspectSettings};
use crate::chart::{ChartBuilder, ChartRequest, ChartSnapshot};
use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::vedic::{compute_panchang, compute_vimshottari, DashaPeriod, PanchangResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    pub snapshot: ChartSnapshot,
    pub aspects: Vec<Aspect>,
    pub panchang: Option<PanchangResult>,
    pub dasha: Option<Vec<DashaPeriod>>,
}

impl ChartReport {
    /// Derive aspects, panchang and dasha from an existing snapshot.
    pub fn from_snapshot(snapshot: ChartSnapshot, settings: &AspectSettings) -> Self {
        let aspects = AspectCalculator::new().detect(&snapshot, settings);
        let panchang = compute_panchang(&snapshot);
        let dasha = compute_vimshottari(&snapshot);
        if panchang.is_none() {
            log::warn!("panchang not computable without Sun and Moon");
        }
        Self {
            snapshot,
            aspects,
            panchang,
            dasha,
        }
    }
}

/// Build a chart for `request` and run every derivation on it.
pub fn generate<P: EphemerisProvider + ?Sized>(
    provider: &P,
    request: &ChartRequest,
    settings: &AspectSettings,
) -> Result<ChartReport, ChartError> {
    settings.validate()?;
    let snapshot = ChartBuilder::new(provider).build(request)?;
    log::debug!(
        "chart at {} built with {} warning(s)",
        snapshot.utc,
        snapshot.warnings.len()
    );
    Ok(ChartReport::from_snapshot(snapshot, settings))
}
