pub mod dashas;
pub mod nakshatra;
pub mod panchang;

pub use dashas::{compute_vimshottari, vimshottari, DashaPeriod, DatedDashaPeriod};
pub use nakshatra::{placement_for_longitude, NakshatraPlacement, NakshatraRecord};
pub use panchang::{compute_panchang, panchang_from_longitudes, Paksha, PanchangResult};
