//! Runtime defaults and environment overrides.

use std::{env, path::PathBuf};

pub const DEFAULT_DATA_SOURCE: &str = "data/freight_rates.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const DATA_SOURCE_ENV: &str = "FREIGHT_RATES_SOURCE";
pub const OUTPUT_DIR_ENV: &str = "FREIGHT_OUTPUT_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Path or http(s) URL of the rate table.
    pub data_source: String,
    /// Where exported tables and charts are written.
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `FREIGHT_RATES_SOURCE` / `FREIGHT_OUTPUT_DIR` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(source) = lookup(DATA_SOURCE_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_source = source.trim().to_string();
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(|key| match key {
            DATA_SOURCE_ENV => Some(" rates/custom.csv ".to_string()),
            OUTPUT_DIR_ENV => Some("/tmp/freight".to_string()),
            _ => None,
        });
        assert_eq!(config.data_source, "rates/custom.csv");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/freight"));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = AppConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }
}
