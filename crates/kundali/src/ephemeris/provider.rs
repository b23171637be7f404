use crate::bodies::Body;
use crate::chart::HouseSystem;
use crate::ephemeris::types::{BodyPosition, GeoLocation, HouseAngles, NodeMode};
use crate::error::EphemerisError;
use crate::sidereal::{self, Ayanamsa};

/// Source of raw geocentric (tropical) positions for an instant.
///
/// Every method is a pure query: the observer location travels with the call
/// and implementations must not keep per-request state between calls.
pub trait EphemerisProvider {
    /// Longitude and longitude speed of a planet. Nodes go through
    /// [`EphemerisProvider::node_position`].
    fn body_position(
        &self,
        jd_ut: f64,
        observer: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError>;

    /// Ascending lunar node (Rahu).
    fn node_position(
        &self,
        jd_ut: f64,
        observer: &GeoLocation,
        mode: NodeMode,
    ) -> Result<BodyPosition, EphemerisError>;

    fn house_angles(
        &self,
        jd_ut: f64,
        observer: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError>;

    /// Ayanamsa in degrees. Defaults to the precession model in [`sidereal`].
    fn ayanamsa(&self, jd_ut: f64, system: Ayanamsa) -> Result<f64, EphemerisError> {
        sidereal::mean_ayanamsa(jd_ut, system)
    }
}
