use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::bodies::Body;
use crate::chart::HouseSystem;
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{BodyPosition, GeoLocation, HouseAngles, NodeMode};
use crate::error::EphemerisError;

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH (use Swiss Ephemeris files) | FLG_SPEED (fill the speed slots)
const CALC_FLAGS: i32 = 2 | 256;

const MEAN_NODE: i32 = 10;
const TRUE_NODE: i32 = 11;

/// Swiss Ephemeris planet codes
fn planet_code(body: Body) -> Option<i32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::Rahu | Body::Ketu => None,
    }
}

/// Swiss Ephemeris backed provider.
///
/// Holds only the resolved data path. Positions are geocentric and carry
/// their distance so the builder can apply parallax; the observer location is
/// used for houses and never pushed into library-wide state.
#[derive(Debug, Clone)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// The resolved directory is handed to Swiss Ephemeris here, once. The
    /// data path is process configuration for the library, so the last
    /// adapter created decides which files every adapter reads.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_text = path.to_string_lossy();
        if path_text.contains('\0') {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path contains a NUL byte".to_string(),
            });
        }
        set_ephe_path(&path_text);
        log::debug!("swiss ephemeris data path: {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn calc(&self, jd_ut: f64, code: i32, object: &str) -> Result<BodyPosition, EphemerisError> {
        let result = calc_ut(jd_ut, code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::unavailable(object, jd_ut, format!("Swiss Ephemeris error: {}", e))
        })?;

        let out = result.out;
        let (lon, lat, distance, speed_lon) = (out[0], out[1], out[2], out[3]);
        if !lon.is_finite() || !speed_lon.is_finite() {
            return Err(EphemerisError::unavailable(
                object,
                jd_ut,
                "non-finite position returned",
            ));
        }
        Ok(BodyPosition {
            lon: lon.rem_euclid(360.0),
            lat,
            speed_lon,
            distance_au: Some(distance).filter(|d| d.is_finite() && *d > 0.0),
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn body_position(
        &self,
        jd_ut: f64,
        _observer: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError> {
        let code = planet_code(body).ok_or_else(|| {
            EphemerisError::unavailable(body.id(), jd_ut, "nodes are derived from node_position")
        })?;
        self.calc(jd_ut, code, body.id())
    }

    fn node_position(
        &self,
        jd_ut: f64,
        _observer: &GeoLocation,
        mode: NodeMode,
    ) -> Result<BodyPosition, EphemerisError> {
        let code = match mode {
            NodeMode::Mean => MEAN_NODE,
            NodeMode::True => TRUE_NODE,
        };
        self.calc(jd_ut, code, "rahu")
    }

    fn house_angles(
        &self,
        jd_ut: f64,
        observer: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        let (c, a) = houses_ex(
            jd_ut,
            CALC_FLAGS,
            observer.lat,
            observer.lon,
            system.code() as i32,
        );
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        let all_finite = ascmc.ascendant.is_finite()
            && ascmc.mc.is_finite()
            && cusp_values.iter().all(|c| c.is_finite());
        if !all_finite {
            return Err(EphemerisError::unavailable(
                format!("houses ({})", system.name()),
                jd_ut,
                "house calculation returned non-finite values",
            ));
        }

        Ok(HouseAngles {
            ascendant: ascmc.ascendant.rem_euclid(360.0),
            midheaven: ascmc.mc.rem_euclid(360.0),
            cusps: cusp_values.map(|c| c.rem_euclid(360.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_codes() {
        assert_eq!(planet_code(Body::Sun), Some(0));
        assert_eq!(planet_code(Body::Pluto), Some(9));
        assert_eq!(planet_code(Body::Rahu), None);
        assert_eq!(planet_code(Body::Ketu), None);
    }

    #[test]
    fn test_missing_path_is_reported() {
        let err = SwissEphemerisAdapter::new(Some(PathBuf::from("/nonexistent/swisseph/data")))
            .unwrap_err();
        assert!(matches!(err, EphemerisError::FileNotFound { .. }));
    }

    #[test]
    fn test_existing_path_is_configured() {
        let dir = env::temp_dir();
        let adapter = SwissEphemerisAdapter::new(Some(dir.clone())).unwrap();
        assert_eq!(adapter.ephemeris_path(), dir.as_path());
    }
}
