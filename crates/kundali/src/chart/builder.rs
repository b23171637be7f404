use std::collections::BTreeMap;

use crate::angles::normalize;
use crate::bodies::Body;
use crate::chart::request::ChartRequest;
use crate::chart::snapshot::{ChartSnapshot, ChartWarning};
use crate::ephemeris::{topocentric_position, EphemerisProvider, HouseAngles};
use crate::error::ChartError;
use crate::sidereal::SiderealCorrection;
use crate::time::utc_iso_string;

/// Builds chart snapshots against one ephemeris provider.
pub struct ChartBuilder<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: EphemerisProvider + ?Sized> ChartBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Compute a snapshot for `request`.
    ///
    /// Only invalid input is an error. Provider failures degrade the affected
    /// fields to `None` and are listed in `warnings`.
    pub fn build(&self, request: &ChartRequest) -> Result<ChartSnapshot, ChartError> {
        let instant = request.validate()?;
        let utc = instant.to_utc()?;
        let jd_ut = instant.julian_day_ut()?;
        let observer = &request.location;
        let mut warnings = Vec::new();

        let correction =
            SiderealCorrection::resolve(self.provider, jd_ut, request.zodiac, request.ayanamsa);
        if let Some(failure) = &correction.failure {
            warnings.push(ChartWarning::SiderealDegraded {
                reason: failure.to_string(),
            });
        }
        let shift = correction.degrees;

        let roster = request.body_set();
        let mut longitudes = BTreeMap::new();
        let mut speeds = BTreeMap::new();

        for body in roster.planets() {
            log::debug!("querying {} at JD {}", body.id(), jd_ut);
            match self.provider.body_position(jd_ut, observer, body) {
                Ok(pos) => {
                    let pos = if request.topocentric {
                        topocentric_position(&pos, jd_ut, observer).unwrap_or_else(|| {
                            log::debug!("no distance for {}, keeping geocentric", body.id());
                            pos
                        })
                    } else {
                        pos
                    };
                    longitudes.insert(body, Some(normalize(pos.lon - shift)));
                    speeds.insert(body, Some(pos.speed_lon));
                }
                Err(e) => {
                    log::warn!("{} unavailable: {}", body.display_name(), e);
                    longitudes.insert(body, None);
                    speeds.insert(body, None);
                    warnings.push(ChartWarning::BodyUnavailable {
                        body,
                        reason: e.to_string(),
                    });
                }
            }
        }

        log::debug!("querying {:?} node at JD {}", request.node_mode, jd_ut);
        match self.provider.node_position(jd_ut, observer, request.node_mode) {
            Ok(node) => {
                let rahu = normalize(node.lon - shift);
                longitudes.insert(Body::Rahu, Some(rahu));
                longitudes.insert(Body::Ketu, Some(normalize(rahu + 180.0)));
                speeds.insert(Body::Rahu, Some(node.speed_lon));
                speeds.insert(Body::Ketu, Some(node.speed_lon));
            }
            Err(e) => {
                log::warn!("lunar nodes unavailable: {}", e);
                for node in [Body::Rahu, Body::Ketu] {
                    longitudes.insert(node, None);
                    speeds.insert(node, None);
                }
                warnings.push(ChartWarning::NodesUnavailable {
                    reason: e.to_string(),
                });
            }
        }

        log::debug!("querying {} houses at JD {}", request.house_system.name(), jd_ut);
        let (ascendant, midheaven, cusps) =
            match self.provider.house_angles(jd_ut, observer, request.house_system) {
                Ok(raw) => {
                    let corrected = HouseAngles {
                        ascendant: normalize(raw.ascendant - shift),
                        midheaven: normalize(raw.midheaven - shift),
                        cusps: raw.cusps.map(|c| c - shift),
                    };
                    let cusps = request.house_system.strategy().cusps(&corrected);
                    (Some(corrected.ascendant), Some(corrected.midheaven), Some(cusps))
                }
                Err(e) => {
                    log::warn!("ascendant and houses unavailable: {}", e);
                    warnings.push(ChartWarning::AnglesUnavailable {
                        reason: e.to_string(),
                    });
                    (None, None, None)
                }
            };

        Ok(ChartSnapshot {
            jd_ut,
            utc: utc_iso_string(&utc),
            zodiac: request.zodiac,
            house_system: request.house_system,
            topocentric: request.topocentric,
            ayanamsa: correction.applied(request.zodiac),
            sidereal_degraded: correction.degraded,
            roster: roster.bodies().to_vec(),
            longitudes,
            speeds,
            ascendant,
            midheaven,
            cusps,
            warnings,
        })
    }
}
