//! GeoJSON input and output for the CLI.

use std::io::Write;
use std::path::Path;

use aqi_common::{BoundingBox, FeatureCollection, OutputMetadata, RawSample, SkipCounts};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::dispatch::Rendered;

/// Engine name written to metadata when the raw points were used.
pub const FALLBACK_ENGINE: &str = "raw";

/// Output target meaning standard output.
pub const STDOUT_TARGET: &str = "-";

/// Samples read from an input file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSamples {
    pub samples: Vec<RawSample>,
    /// Features that could not be read as samples.
    pub skipped: SkipCounts,
    /// Features dropped by the region filter.
    pub outside_region: usize,
}

/// Read samples from a GeoJSON FeatureCollection file.
///
/// With `region`, samples outside it (edges inclusive) are dropped.
pub fn read_samples(path: &Path, region: Option<&BoundingBox>) -> Result<InputSamples> {
    let collection = FeatureCollection::from_path(path)
        .with_context(|| format!("Failed to load samples from {:?}", path))?;

    let (mut samples, skipped) = collection.raw_samples();
    if !skipped.is_empty() {
        warn!(skipped = skipped.total(), "Some features could not be read");
    }

    let before = samples.len();
    if let Some(region) = region {
        samples.retain(|s| region.contains(s.lon, s.lat));
    }
    let outside_region = before - samples.len();

    info!(
        path = ?path,
        features = collection.features.len(),
        samples = samples.len(),
        outside_region,
        "Loaded samples"
    );

    Ok(InputSamples {
        samples,
        skipped,
        outside_region,
    })
}

/// Build the output document for a rendered result.
///
/// `input` contributes its read failures to the reported skip counts.
pub fn build_document(
    rendered: &Rendered,
    input: &InputSamples,
    with_color: bool,
) -> FeatureCollection {
    let mut metadata = match rendered {
        Rendered::Densified(outcome) => outcome.report.to_metadata(),
        Rendered::Fallback {
            collection,
            skipped,
            ..
        } => OutputMetadata {
            engine: FALLBACK_ENGINE.to_string(),
            input_count: input.samples.len(),
            output_count: collection.len(),
            skipped: skipped.clone(),
            generated_at: Utc::now(),
        },
    };
    metadata.skipped.merge(&input.skipped);

    FeatureCollection::from_points(&rendered.collection().points, with_color)
        .with_metadata(metadata)
}

/// Write a document as pretty JSON to a file, or to stdout for `-`.
pub fn write_document(doc: &FeatureCollection, target: &str) -> Result<()> {
    let json = doc.to_json_pretty().context("Failed to serialize output")?;

    if target == STDOUT_TARGET {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
    } else {
        std::fs::write(target, json).with_context(|| format!("Failed to write: {}", target))?;
        info!(path = %target, features = doc.features.len(), "Wrote output");
    }

    Ok(())
}
