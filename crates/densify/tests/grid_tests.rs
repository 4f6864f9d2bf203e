//! Integration tests for the IDW density grid.

use aqi_common::{PointCollection, Provenance, SkipReason};
use densify::{normalize_all, synthesize};
use test_utils::{assert_approx_eq, create_mock_samples, create_plume_samples, two_station_samples};

fn normalized(samples: &[aqi_common::RawSample]) -> PointCollection {
    normalize_all(samples).0
}

// =============================================================================
// Cardinality and Envelope
// =============================================================================

#[test]
fn test_grid_cardinality() {
    let input = normalized(&two_station_samples());
    for resolution in [1u32, 2, 10, 40] {
        let out = synthesize(&input, resolution).unwrap();
        let side = resolution as usize + 1;
        assert_eq!(out.collection.len(), side * side, "resolution {}", resolution);
        assert_eq!(out.collection.count_by(Provenance::Synthesized), side * side);
    }
}

#[test]
fn test_padded_envelope_strictly_contains_input() {
    let input = normalized(&create_mock_samples(test_utils::bbox::DELHI, 6));
    let input_envelope = input.envelope().unwrap();

    let out = synthesize(&input, 20).unwrap();
    let output_envelope = out.collection.envelope().unwrap();
    assert!(output_envelope.strictly_contains(&input_envelope));

    // Corners of the lattice are the padded corners.
    let first = out.collection.points.first().unwrap();
    let last = out.collection.points.last().unwrap();
    assert_approx_eq!(first.lon, 76.8 - 0.07, 1e-9);
    assert_approx_eq!(first.lat, 28.3 - 0.07, 1e-9);
    assert_approx_eq!(last.lon, 77.5 + 0.07, 1e-9);
    assert_approx_eq!(last.lat, 29.0 + 0.07, 1e-9);
}

// =============================================================================
// Estimates
// =============================================================================

#[test]
fn test_single_sample_reproduced_everywhere() {
    let input = normalized(&[aqi_common::RawSample::new(77.2, 28.6, 137.0)]);
    let out = synthesize(&input, 10).unwrap();

    assert_eq!(out.collection.len(), 121);
    assert!(out.skipped.is_empty());
    for p in out.collection.iter() {
        assert_approx_eq!(p.value, 137.0, 1e-9);
    }
}

#[test]
fn test_estimates_stay_within_sample_range() {
    let input = normalized(&create_plume_samples((77.2, 28.6), 3, 6, 0.02, 400.0));
    let out = synthesize(&input, 15).unwrap();

    let (lo, hi) = input
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
    for p in out.collection.iter() {
        assert!(p.value >= lo - 1e-9 && p.value <= hi + 1e-9, "value {}", p.value);
    }
}

#[test]
fn test_values_increase_along_station_axis() {
    let input = normalized(&two_station_samples());
    let out = synthesize(&input, 10).unwrap();
    assert_eq!(out.collection.len(), 121);

    // Diagonal lattice points (i == j) lie on the line through both
    // stations; indices 1..=9 fall between them.
    let diagonal: Vec<f64> = (1..=9)
        .map(|k| out.collection.points[k * 11 + k].value)
        .collect();
    for pair in diagonal.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", diagonal);
    }
}

#[test]
fn test_unusable_samples_do_not_poison_grid() {
    let mut input = normalized(&two_station_samples());
    input
        .points
        .push(aqi_common::SamplePoint::measured(77.105, 28.655, f64::MAX));

    let out = synthesize(&input, 4).unwrap();
    assert_eq!(out.collection.len(), 25);
    // The third sample overflows at every lattice point but is reported once.
    assert_eq!(out.skipped.get(SkipReason::NonFiniteResult), 1);
    for p in out.collection.iter() {
        assert!(p.value >= 50.0 && p.value <= 150.0, "value {}", p.value);
    }
}
