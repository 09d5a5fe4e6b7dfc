use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    #[serde(default)]
    pub bands: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            bands: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_window_seconds() -> f64 { 3.0 }
fn default_pretty() -> bool { true }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// `./loudgraph.toml`, then `~/.config/loudgraph/config.toml`, then the
/// platform config directory.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("loudgraph.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("loudgraph").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("loudgraph").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
