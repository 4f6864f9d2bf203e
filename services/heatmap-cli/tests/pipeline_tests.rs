//! File-to-file pipeline tests through the CLI library.

use aqi_common::{BoundingBox, FeatureCollection};
use densify::DensificationConfig;
use heatmap_cli::io::{build_document, read_samples, write_document};
use heatmap_cli::{Dispatch, Dispatcher, Rendered};
use test_utils::{
    bbox, create_mock_samples, samples_to_geojson, two_station_samples, write_temp_json, HIGH_ZOOM,
    LOW_ZOOM,
};

async fn run_pipeline(
    json: &str,
    zoom: f64,
    config: DensificationConfig,
    region: Option<BoundingBox>,
) -> serde_json::Value {
    let input_file = write_temp_json(json);
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("heatmap.geojson");

    let input = read_samples(input_file.path(), region.as_ref()).unwrap();
    let rendered = match Dispatcher::new(config)
        .run(input.samples.clone(), zoom)
        .await
        .unwrap()
    {
        Dispatch::Fresh(rendered) => rendered,
        stale => panic!("unexpected stale result: {:?}", stale),
    };
    let doc = build_document(&rendered, &input, true);
    write_document(&doc, out_path.to_str().unwrap()).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    serde_json::from_str(&written).unwrap()
}

#[tokio::test]
async fn test_two_stations_high_zoom() {
    let json = samples_to_geojson(&two_station_samples())
        .to_json_pretty()
        .unwrap();
    let doc = run_pipeline(&json, HIGH_ZOOM, DensificationConfig::default(), None).await;

    assert_eq!(doc["metadata"]["engine"], "neighbor_interpolation");
    assert_eq!(doc["metadata"]["input_count"], 2);
    assert_eq!(doc["features"].as_array().unwrap().len(), 6);
    assert_eq!(doc["features"][2]["properties"]["provenance"], "interpolated");
    assert!(doc["metadata"]["generated_at"].is_string());
}

#[tokio::test]
async fn test_mock_region_low_zoom_with_filter() {
    let json = samples_to_geojson(&create_mock_samples(bbox::DELHI, 10))
        .to_json_pretty()
        .unwrap();
    let config = DensificationConfig {
        grid_resolution_low_zoom: 12,
        ..Default::default()
    };
    // Western half of the region only.
    let region = BoundingBox::new(76.8, 28.3, 77.15, 29.0);
    let doc = run_pipeline(&json, LOW_ZOOM, config, Some(region)).await;

    assert_eq!(doc["metadata"]["engine"], "density_grid");
    assert_eq!(doc["metadata"]["input_count"], 50);
    assert_eq!(doc["features"].as_array().unwrap().len(), 13 * 13);
    assert_eq!(doc["features"][0]["properties"]["provenance"], "synthesized");
    assert!(doc["features"][0]["properties"]["color"].is_string());
}

#[tokio::test]
async fn test_output_is_valid_input() {
    let json = samples_to_geojson(&two_station_samples())
        .to_json_pretty()
        .unwrap();
    let doc = run_pipeline(&json, HIGH_ZOOM, DensificationConfig::default(), None).await;

    // Output documents can be fed back in; metadata is ignored on read.
    let reread = FeatureCollection::from_json(&doc.to_string()).unwrap();
    let (samples, skipped) = reread.raw_samples();
    assert_eq!(samples.len(), 6);
    assert!(skipped.is_empty());
}

#[tokio::test]
async fn test_latest_submission_wins() {
    let dispatcher = Dispatcher::new(DensificationConfig::default());
    let samples = two_station_samples();

    let pending: Vec<_> = [LOW_ZOOM, 10.0, 11.0, HIGH_ZOOM]
        .into_iter()
        .map(|zoom| dispatcher.submit(samples.clone(), zoom))
        .collect();

    let mut fresh = Vec::new();
    for p in pending {
        if let Dispatch::Fresh(rendered) = p.wait().await.unwrap() {
            fresh.push(rendered);
        }
    }

    assert_eq!(fresh.len(), 1);
    match &fresh[0] {
        Rendered::Densified(outcome) => assert_eq!(outcome.report.zoom, HIGH_ZOOM),
        other => panic!("unexpected fallback: {:?}", other),
    }
}

#[test]
fn test_dispatch_on_current_thread_runtime() {
    let dispatcher = Dispatcher::new(DensificationConfig::default());
    let result = tokio_test::block_on(dispatcher.run(two_station_samples(), LOW_ZOOM)).unwrap();

    match result {
        Dispatch::Fresh(rendered) => assert_eq!(rendered.collection().len(), 41 * 41),
        stale => panic!("unexpected stale result: {:?}", stale),
    }
}
