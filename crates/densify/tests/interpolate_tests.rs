//! Integration tests for the neighbor interpolator.

use aqi_common::{PointCollection, Provenance, SamplePoint};
use densify::{interpolate, interpolate_with, normalize_all, InterpolationOptions, UniformGridIndex};
use test_utils::{assert_on_segment, create_line_samples, same_cell_samples};

fn collection(points: &[(f64, f64, f64)]) -> PointCollection {
    PointCollection::new(
        points
            .iter()
            .map(|&(lon, lat, value)| SamplePoint::measured(lon, lat, value))
            .collect(),
    )
}

// =============================================================================
// Degenerate Input
// =============================================================================

#[test]
fn test_empty_input_is_noop() {
    let out = interpolate(&PointCollection::default(), &InterpolationOptions::new(3)).unwrap();
    assert!(out.collection.is_empty());
    assert!(out.skipped.is_empty());
}

#[test]
fn test_single_point_is_noop() {
    let input = collection(&[(77.1, 28.6, 90.0)]);
    let out = interpolate(&input, &InterpolationOptions::new(3)).unwrap();
    assert_eq!(out.collection, input);
}

#[test]
fn test_isolated_points_get_no_synthetics() {
    // Three cells apart in longitude.
    let input = collection(&[(10.005, 10.005, 10.0), (10.035, 10.005, 20.0)]);
    let out = interpolate(&input, &InterpolationOptions::new(4)).unwrap();
    assert_eq!(out.collection.len(), 2);
    assert_eq!(out.collection.count_by(Provenance::Interpolated), 0);
}

// =============================================================================
// Edge Expansion
// =============================================================================

#[test]
fn test_same_cell_pair_factor_three() {
    let (input, _) = normalize_all(&same_cell_samples());
    let out = interpolate(&input, &InterpolationOptions::new(3)).unwrap();

    // 2 originals + 2 directed edges * (factor - 1) synthetics.
    assert_eq!(out.collection.len(), 6);
    assert_eq!(&out.collection.points[..2], &input.points[..]);

    let values: Vec<f64> = out.collection.points[2..].iter().map(|p| p.value).collect();
    assert_eq!(values, vec![80.0, 120.0, 120.0, 80.0]);
}

#[test]
fn test_dedupe_visits_each_pair_once() {
    let (input, _) = normalize_all(&same_cell_samples());
    let options = InterpolationOptions {
        factor: 3,
        dedupe_edges: true,
    };
    let out = interpolate(&input, &options).unwrap();
    assert_eq!(out.collection.len(), 4);
    assert_eq!(out.collection.count_by(Provenance::Interpolated), 2);
}

#[test]
fn test_synthetics_lie_on_segment_within_value_range() {
    let input = collection(&[(0.101, 0.102, 20.0), (0.118, 0.111, 260.0)]);
    let out = interpolate(&input, &InterpolationOptions::new(5)).unwrap();

    let (a, b) = (input.points[0], input.points[1]);
    let synthetics: Vec<_> = out
        .collection
        .iter()
        .filter(|p| p.provenance == Provenance::Interpolated)
        .collect();
    assert_eq!(synthetics.len(), 8);

    for p in synthetics {
        assert_on_segment!((p.lon, p.lat), (a.lon, a.lat), (b.lon, b.lat), 1e-12);
        assert!(p.value >= 20.0 && p.value <= 260.0, "value {}", p.value);
        assert_eq!(p.value, p.value.round());
        assert_eq!(p.intensity, p.value / 500.0);
    }
}

#[test]
fn test_line_chain_only_links_adjacent_cells() {
    // Samples one cell apart: each links to its immediate neighbors only.
    let (input, _) = normalize_all(&create_line_samples((5.005, 5.005), 0.01, 4, 10.0));
    let out = interpolate(&input, &InterpolationOptions::new(2)).unwrap();

    // 3 undirected edges, visited from both ends, one midpoint each.
    assert_eq!(out.collection.count_by(Provenance::Interpolated), 6);
}

// =============================================================================
// Determinism and Index Injection
// =============================================================================

#[test]
fn test_output_is_deterministic() {
    let (input, _) = normalize_all(&create_line_samples((1.001, 2.002), 0.003, 12, 7.0));
    let options = InterpolationOptions::new(3);
    let first = interpolate(&input, &options).unwrap();
    for _ in 0..5 {
        assert_eq!(interpolate(&input, &options).unwrap(), first);
    }
}

#[test]
fn test_coarser_index_finds_more_neighbors() {
    let input = collection(&[(0.005, 0.005, 10.0), (0.035, 0.005, 50.0)]);
    let options = InterpolationOptions::new(2);

    let fine = interpolate_with(&input, &options, UniformGridIndex::new()).unwrap();
    assert_eq!(fine.collection.len(), 2);

    // Cells of 0.1 degree put both samples in one bucket.
    let coarse = interpolate_with(&input, &options, UniformGridIndex::with_scale(10.0)).unwrap();
    assert_eq!(coarse.collection.len(), 4);
    assert_eq!(coarse.collection.points[2].value, 30.0);
}
