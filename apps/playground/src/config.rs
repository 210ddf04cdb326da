use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "playground.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            output_format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    log_filter: Option<String>,
    output_format: Option<OutputFormat>,
}

/// Defaults, then the config file, then `APP__*` environment variables.
///
/// An explicit `path` must exist. Without one, `playground.toml` in the working
/// directory is read when present.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };
    if let Some(file_path) = file_path {
        let raw = fs::read_to_string(&file_path)
            .with_context(|| format!("failed to read config file '{}'", file_path.display()))?;
        apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", file_path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.output_format {
        settings.output_format = v;
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__OUTPUT_FORMAT") {
        let raw = v.trim();
        settings.output_format = <OutputFormat as ValueEnum>::from_str(raw, true)
            .map_err(|_| anyhow::anyhow!("unknown output format '{raw}' (expected text or json)"))
            .context("APP__OUTPUT_FORMAT is not a valid output format")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
