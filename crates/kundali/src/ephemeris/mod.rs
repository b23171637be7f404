pub mod adapter;
pub mod fixture;
pub mod provider;
pub mod topocentric;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use fixture::StaticEphemeris;
pub use provider::EphemerisProvider;
pub use topocentric::topocentric_position;
pub use types::{BodyPosition, GeoLocation, HouseAngles, NodeMode};
