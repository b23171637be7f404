use kundali::angles::min_angular_separation;
use kundali::{
    AspectCalculator, AspectDefinition, AspectSettings, Body, ChartBuilder, ChartRequest,
    ChartSnapshot, GeoLocation, MatchPolicy, StaticEphemeris,
};

fn snapshot(provider: &StaticEphemeris) -> ChartSnapshot {
    let req = ChartRequest::new("2000-01-01", "12:00", 0.0, GeoLocation::new(51.5, -0.12));
    ChartBuilder::new(provider).build(&req).unwrap()
}

#[test]
fn test_sextile_at_exact_sixty() {
    let provider = StaticEphemeris::new()
        .with_body(Body::Sun, 10.0, 1.0)
        .with_body(Body::Moon, 70.0, 13.0);
    let aspects = AspectCalculator::new().detect(&snapshot(&provider), &AspectSettings::default());
    assert_eq!(aspects.len(), 1);
    let a = &aspects[0];
    assert_eq!(a.body_a, Body::Sun);
    assert_eq!(a.body_b, Body::Moon);
    assert_eq!(a.name, "sextile");
    assert_eq!(a.separation, 60.0);
    assert!(a.exact);
    assert_eq!(a.weight, 0.6);
    // Moon pulls away from the Sun
    assert_eq!(a.applying, Some(false));
}

#[test]
fn test_zero_orb_still_matches_exactly() {
    let settings = AspectSettings::new(vec![AspectDefinition::new("sextile", 60.0, 0.0, 1.0)]);
    let matches = AspectCalculator::new().calculate(10.0, 70.0, None, None, &settings);
    assert_eq!(matches.len(), 1);
    let matches = AspectCalculator::new().calculate(10.0, 70.5, None, None, &settings);
    assert!(matches.is_empty());
}

#[test]
fn test_separation_symmetry_and_range() {
    for i in 0..72 {
        for j in 0..72 {
            let a = i as f64 * 5.3 - 20.0;
            let b = j as f64 * 7.1 + 3.0;
            let ab = min_angular_separation(a, b);
            assert!((0.0..=180.0).contains(&ab));
            assert!((ab - min_angular_separation(b, a)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_nodes_excluded_by_default() {
    let provider = StaticEphemeris::new()
        .with_body(Body::Sun, 10.0, 1.0)
        .with_node(12.0, -0.05);
    let snap = snapshot(&provider);

    let default = AspectCalculator::new().detect(&snap, &AspectSettings::default());
    assert!(default.is_empty());

    let with_nodes = AspectSettings::default().with_nodes(true);
    let aspects = AspectCalculator::new().detect(&snap, &with_nodes);
    // Sun-Rahu conjunction and Sun-Ketu opposition, never Rahu-Ketu
    assert_eq!(aspects.len(), 2);
    assert!(aspects
        .iter()
        .all(|a| !(a.body_a.is_node() && a.body_b.is_node())));
    assert_eq!(aspects[0].body_b, Body::Rahu);
    assert_eq!(aspects[0].name, "conjunction");
    assert_eq!(aspects[1].body_b, Body::Ketu);
    assert_eq!(aspects[1].name, "opposition");
}

#[test]
fn test_unknown_bodies_are_skipped() {
    let provider = StaticEphemeris::new()
        .with_body(Body::Sun, 10.0, 1.0)
        .with_body(Body::Venus, 12.0, 1.2);
    let aspects = AspectCalculator::new().detect(&snapshot(&provider), &AspectSettings::default());
    assert_eq!(aspects.len(), 1);
    assert_eq!((aspects[0].body_a, aspects[0].body_b), (Body::Sun, Body::Venus));
}

#[test]
fn test_closest_policy_keeps_one_per_pair() {
    let defs = vec![
        AspectDefinition::new("conjunction", 0.0, 12.0, 1.0),
        AspectDefinition::new("semi_sextile", 30.0, 25.0, 0.3),
    ];
    let provider = StaticEphemeris::new()
        .with_body(Body::Sun, 0.0, 1.0)
        .with_body(Body::Mercury, 8.0, 1.5)
        .with_body(Body::Mars, 20.0, 0.6);
    let snap = snapshot(&provider);

    let all = AspectCalculator::new().detect(&snap, &AspectSettings::new(defs.clone()));
    assert_eq!(all.len(), 5);

    let closest = AspectSettings::new(defs).with_policy(MatchPolicy::Closest);
    let aspects = AspectCalculator::new().detect(&snap, &closest);
    assert_eq!(aspects.len(), 3);
    let sun_mars = aspects
        .iter()
        .find(|a| a.body_a == Body::Sun && a.body_b == Body::Mars)
        .unwrap();
    assert_eq!(sun_mars.name, "semi_sextile");
    assert!((sun_mars.deviation - 10.0).abs() < 1e-9);
}

#[test]
fn test_settings_round_trip_through_json() {
    let json = r#"{
        "definitions": [
            { "name": "trine", "angle": 120.0, "orb": 5.0 }
        ],
        "policy": "closest"
    }"#;
    let settings: AspectSettings = serde_json::from_str(json).unwrap();
    assert_eq!(settings.policy, MatchPolicy::Closest);
    assert!(!settings.include_nodes);
    assert_eq!(settings.definitions[0].weight, 1.0);
    assert!(settings.validate().is_ok());
}
