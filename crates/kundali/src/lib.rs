pub mod angles;
pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod export;
pub mod report;
pub mod sidereal;
pub mod time;
pub mod vedic;

pub use aspects::{Aspect, AspectCalculator, AspectDefinition, AspectSettings, MatchPolicy};
pub use bodies::{Body, BodySet};
pub use chart::{ChartBuilder, ChartRequest, ChartSnapshot, ChartWarning, HouseSystem, ZodiacMode};
pub use ephemeris::{EphemerisProvider, GeoLocation, NodeMode, StaticEphemeris, SwissEphemerisAdapter};
pub use error::{ChartError, EphemerisError};
pub use report::{generate, ChartReport};
pub use sidereal::Ayanamsa;
pub use vedic::{DashaPeriod, PanchangResult};
