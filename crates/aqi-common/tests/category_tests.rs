//! Tests for AQI band lookup.

use aqi_common::category::{category, AqiCategory, CategoryInfo, ALL_CATEGORIES};

// ============================================================================
// Band coverage
// ============================================================================

#[test]
fn test_band_coverage_at_boundaries() {
    let cases = [
        (0.0, AqiCategory::Good),
        (50.0, AqiCategory::Good),
        (50.1, AqiCategory::Moderate),
        (100.0, AqiCategory::Moderate),
        (150.5, AqiCategory::Unhealthy),
        (200.0, AqiCategory::Unhealthy),
        (300.0, AqiCategory::VeryUnhealthy),
        (301.0, AqiCategory::Hazardous),
        (10000.0, AqiCategory::Hazardous),
        (-5.0, AqiCategory::Good),
    ];

    for (value, expected) in cases {
        assert_eq!(category(value), expected, "value {}", value);
    }
}

#[test]
fn test_every_value_maps_to_exactly_one_band() {
    // Walk the whole range in small steps: lookups must be monotone in severity.
    let mut previous = 0usize;
    let mut v = -10.0;
    while v < 600.0 {
        let band = category(v);
        let rank = ALL_CATEGORIES.iter().position(|c| *c == band).unwrap();
        assert!(rank >= previous, "band went backwards at {}", v);
        previous = rank;
        v += 0.25;
    }
    assert_eq!(previous, ALL_CATEGORIES.len() - 1);
}

#[test]
fn test_lower_bounds_are_exclusive_edges_of_previous_band() {
    for pair in ALL_CATEGORIES.windows(2) {
        let edge = pair[1].lower_bound().unwrap();
        assert_eq!(category(edge), pair[0]);
        assert_eq!(category(edge + 0.01), pair[1]);
    }
}

// ============================================================================
// Colors and labels
// ============================================================================

#[test]
fn test_colors_and_labels() {
    let expected = [
        ("Good", "#00E400"),
        ("Moderate", "#FFFF00"),
        ("Unhealthy for Sensitive Groups", "#FF7E00"),
        ("Unhealthy", "#FF0000"),
        ("Very Unhealthy", "#99004C"),
        ("Hazardous", "#7E0023"),
    ];

    for (band, (label, color)) in ALL_CATEGORIES.iter().zip(expected) {
        assert_eq!(band.label(), label);
        assert_eq!(band.color(), color);
        assert!(!band.description().is_empty());
    }
}

#[test]
fn test_category_info_serialization() {
    let info: CategoryInfo = category(120.0).into();
    let json = serde_json::to_string(&info).unwrap();
    assert_eq!(
        json,
        r##"{"color":"#FF7E00","label":"Unhealthy for Sensitive Groups"}"##
    );
}

#[test]
fn test_display_uses_label() {
    assert_eq!(AqiCategory::VeryUnhealthy.to_string(), "Very Unhealthy");
}
