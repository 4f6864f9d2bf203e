//! Engine configuration loading for the CLI.

use anyhow::{Context, Result};
use densify::DensificationConfig;
use std::path::Path;

/// Load configuration: defaults, then an optional YAML file, then
/// `HEATMAP_*` environment overrides. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<DensificationConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit override lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<DensificationConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {:?}", path))?;
            let config: DensificationConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", path))?;
            tracing::info!(path = ?path, "Loaded densification config");
            config
        }
        None => DensificationConfig::default(),
    };

    let config = base.with_overrides(lookup);
    config
        .validate()
        .context("Invalid densification configuration")?;

    Ok(config)
}
