use crate::angles::min_angular_separation;
use crate::aspects::types::{Aspect, AspectMatch, AspectSettings, MatchPolicy};
use crate::bodies::Body;
use crate::chart::ChartSnapshot;

/// Within this many degrees an aspect is "exact"
pub const EXACT_THRESHOLD: f64 = 0.1;

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspects between every pair of known bodies in the snapshot, in roster
    /// order.
    pub fn detect(&self, snapshot: &ChartSnapshot, settings: &AspectSettings) -> Vec<Aspect> {
        let bodies: Vec<(Body, f64)> = snapshot
            .known_bodies()
            .filter(|(body, _)| settings.include_nodes || !body.is_node())
            .collect();

        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (body_a, lon_a) = bodies[i];
                let (body_b, lon_b) = bodies[j];
                // Always an exact opposition
                if body_a.is_node() && body_b.is_node() {
                    continue;
                }
                let matches = self.calculate(
                    lon_a,
                    lon_b,
                    snapshot.speed(body_a),
                    snapshot.speed(body_b),
                    settings,
                );
                aspects.extend(matches.into_iter().map(|m| m.between(body_a, body_b)));
            }
        }
        aspects
    }

    /// Matches for a single pair of longitudes, in definition order (or the
    /// closest one alone under [`MatchPolicy::Closest`]).
    pub fn calculate(
        &self,
        lon_a: f64,
        lon_b: f64,
        speed_a: Option<f64>,
        speed_b: Option<f64>,
        settings: &AspectSettings,
    ) -> Vec<AspectMatch> {
        let separation = min_angular_separation(lon_a, lon_b);

        let mut matches: Vec<AspectMatch> = settings
            .definitions
            .iter()
            .filter_map(|def| {
                let deviation = (separation - def.angle).abs();
                if deviation > def.orb {
                    return None;
                }
                let applying = match (speed_a, speed_b) {
                    (Some(a), Some(b)) => Some(is_applying(lon_a, lon_b, a, b, def.angle, separation)),
                    _ => None,
                };
                Some(AspectMatch {
                    separation,
                    definition: def.clone(),
                    deviation,
                    exact: deviation < EXACT_THRESHOLD,
                    applying,
                })
            })
            .collect();

        if settings.policy == MatchPolicy::Closest && matches.len() > 1 {
            let mut best = 0;
            for (idx, m) in matches.iter().enumerate() {
                if m.deviation < matches[best].deviation {
                    best = idx;
                }
            }
            let closest = matches.swap_remove(best);
            matches = vec![closest];
        }
        matches
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the pair moves toward the exact angle over a short step.
fn is_applying(
    lon_a: f64,
    lon_b: f64,
    speed_a: f64,
    speed_b: f64,
    aspect_angle: f64,
    current_angle: f64,
) -> bool {
    let relative_speed = speed_a - speed_b;

    // No usable relative motion
    if relative_speed.abs() < 0.01 {
        return current_angle < aspect_angle + 0.5;
    }

    let signed_diff = wrap_signed(lon_a - lon_b);
    let current_distance = (current_angle - aspect_angle).abs();

    // One tenth of a day
    let time_step = 0.1;
    let future_angle = wrap_signed(signed_diff + relative_speed * time_step).abs();
    let future_distance = (future_angle - aspect_angle).abs();

    future_distance < current_distance
}

/// Fold a difference into (-180, 180].
fn wrap_signed(diff: f64) -> f64 {
    if diff > 180.0 {
        diff - 360.0
    } else if diff <= -180.0 {
        diff + 360.0
    } else {
        diff
    }
}
