//! Configuration loading and parsing.
//!
//! The viewer runs with no configuration at all; every field has a default
//! that reproduces the stock behavior. An optional `traceview.toml` can tune
//! the content width ratio, the grouping key pattern, tab expansion, the
//! group colour strategy and the log file location.
//!
//! Discovery order: `$TRACEVIEW_CONFIG`, `./traceview.toml`, then
//! `<config_dir>/traceview/traceview.toml`. Configuration is never taken from
//! the command line, which accepts exactly one positional argument.
//!
//! Resilience: a missing file yields defaults silently, an unparseable file
//! yields defaults with a warning. Unknown fields are ignored so older
//! binaries tolerate newer files. Out-of-range values are clamped when the
//! effective values are computed, and the clamp is logged at target `config`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "TRACEVIEW_CONFIG";
const CONFIG_FILE_NAME: &str = "traceview.toml";

/// Default grouping key rule: a leading run of ASCII digits terminated by
/// whitespace (or the end of the line).
pub const DEFAULT_KEY_PATTERN: &str = r"^([0-9]+)(?:\s|$)";

const MIN_CONTENT_WIDTH_RATIO: f32 = 0.25;
const MAX_CONTENT_WIDTH_RATIO: f32 = 1.0;

/// How group keys are mapped onto the colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStrategy {
    /// Keyed hash with fixed seeds: the same key gets the same colour on every run.
    #[default]
    Hash,
    /// Keyed hash with per-session random seeds: stable within a session only.
    Random,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportConfig {
    #[serde(default = "ViewportConfig::default_content_width_ratio")]
    pub content_width_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            content_width_ratio: Self::default_content_width_ratio(),
        }
    }
}

impl ViewportConfig {
    const fn default_content_width_ratio() -> f32 {
        0.75
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    #[serde(default = "DocumentConfig::default_key_pattern")]
    pub key_pattern: String,
    #[serde(default = "DocumentConfig::default_tab_width")]
    pub tab_width: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            key_pattern: Self::default_key_pattern(),
            tab_width: Self::default_tab_width(),
        }
    }
}

impl DocumentConfig {
    fn default_key_pattern() -> String {
        DEFAULT_KEY_PATTERN.to_string()
    }
    const fn default_tab_width() -> usize {
        4
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ColorConfig {
    #[serde(default)]
    pub strategy: ColorStrategy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("traceview.log")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,        // parsed (or default) data
}

/// Resolve the configuration path, preferring an explicit override.
pub fn discover_with(env_override: Option<PathBuf>) -> PathBuf {
    if let Some(path) = env_override {
        return path;
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("traceview").join(CONFIG_FILE_NAME);
    }
    local
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    discover_with(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error_defaults_used");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Content width ratio clamped into `[0.25, 1.0]`. Non-finite values fall
    /// back to the default.
    pub fn effective_content_width_ratio(&self) -> f32 {
        let raw = self.file.viewport.content_width_ratio;
        let clamped = if raw.is_finite() {
            raw.clamp(MIN_CONTENT_WIDTH_RATIO, MAX_CONTENT_WIDTH_RATIO)
        } else {
            ViewportConfig::default_content_width_ratio()
        };
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                min = MIN_CONTENT_WIDTH_RATIO,
                max = MAX_CONTENT_WIDTH_RATIO,
                "content_width_ratio_clamped"
            );
        }
        clamped
    }

    pub fn key_pattern(&self) -> &str {
        &self.file.document.key_pattern
    }

    pub fn tab_width(&self) -> usize {
        self.file.document.tab_width
    }

    pub fn color_strategy(&self) -> ColorStrategy {
        self.file.colors.strategy
    }

    pub fn log_file(&self) -> &std::path::Path {
        &self.file.log.file
    }
}
