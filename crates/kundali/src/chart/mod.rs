pub mod builder;
pub mod houses;
pub mod request;
pub mod snapshot;

pub use builder::ChartBuilder;
pub use houses::{HouseStrategy, HouseSystem, ProviderHouses, WholeSignHouses};
pub use request::ChartRequest;
pub use snapshot::{ChartSnapshot, ChartWarning};

pub use crate::sidereal::ZodiacMode;
