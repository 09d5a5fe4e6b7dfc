use anyhow::{Context, Result};
use std::path::Path;

use crate::audio::features::AnalysisData;

/// Serialize the full analysis. Silent levels are written as `"-inf"`.
pub fn to_json(data: &AnalysisData, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    };
    json.context("Failed to serialize analysis data")
}

pub fn write_json(path: &Path, data: &AnalysisData, pretty: bool) -> Result<()> {
    let json = to_json(data, pretty)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write analysis to {}", path.display()))?;
    log::info!("Exported {} result(s) to {}", data.results.len(), path.display());
    Ok(())
}
