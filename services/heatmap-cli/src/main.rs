//! Heatmap densification CLI.
//!
//! Reads AQI samples from a GeoJSON file, densifies them for a zoom level and
//! writes a heatmap-ready GeoJSON FeatureCollection.

use std::path::PathBuf;

use anyhow::{bail, Result};
use aqi_common::BoundingBox;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use heatmap_cli::config::load_config;
use heatmap_cli::io::{build_document, read_samples, write_document};
use heatmap_cli::{Dispatch, Dispatcher, Rendered};

#[derive(Parser, Debug)]
#[command(name = "heatmap-cli")]
#[command(about = "Densify air-quality samples into heatmap points")]
struct Args {
    /// Input GeoJSON FeatureCollection of Point features with an `aqi` property
    #[arg(short, long, env = "HEATMAP_INPUT")]
    input: PathBuf,

    /// Output file, or `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Map zoom level used to pick the engine
    #[arg(short, long)]
    zoom: f64,

    /// YAML file with densification settings
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Only use samples inside "min_lon,min_lat,max_lon,max_lat"
    #[arg(long)]
    bbox: Option<BoundingBox>,

    /// Add the AQI category color to each output feature
    #[arg(long)]
    with_color: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(input = ?args.input, zoom = args.zoom, "Starting heatmap densification");

    let config = load_config(args.config.as_deref())?;
    let input = read_samples(&args.input, args.bbox.as_ref())?;

    let dispatcher = Dispatcher::new(config);
    let rendered = match dispatcher.run(input.samples.clone(), args.zoom).await? {
        Dispatch::Fresh(rendered) => rendered,
        Dispatch::Stale { generation, latest } => {
            bail!("Result {} superseded by {}", generation, latest)
        }
    };

    if let Rendered::Fallback { error, .. } = &rendered {
        error!(error = %error, "Engine failed; writing raw points");
    }

    let doc = build_document(&rendered, &input, args.with_color);
    write_document(&doc, &args.output)?;

    info!(
        features = doc.features.len(),
        fallback = rendered.is_fallback(),
        "Done"
    );

    Ok(())
}
