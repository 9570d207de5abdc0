use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_REFRESH_INTERVAL_MS: u64 = 250;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the totals file lives; defaults to the platform data dir.
    pub data_file: Option<PathBuf>,
    /// How often the dashboard redraws.
    pub refresh_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Try to load from file first
        let mut config = if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                let config_str = std::fs::read_to_string(&config_path)
                    .context("Failed to read config file")?;

                serde_yaml::from_str(&config_str).context("Failed to parse config file")?
            } else {
                Config::default()
            }
        } else {
            Config::default()
        };

        // Environment variables override the file
        if let Ok(path) = env::var("SCROLL_TRACKER_DATA_FILE") {
            config.data_file = Some(PathBuf::from(path));
        }

        if let Ok(ms) = env::var("SCROLL_TRACKER_REFRESH_MS") {
            if let Ok(ms) = ms.parse() {
                config.refresh_interval_ms = ms;
            }
        }

        log::debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "scroll-tracker", "tracker")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn yaml_overrides_defaults() {
        let config: Config =
            serde_yaml::from_str("data_file: /tmp/scrolls.json\nrefresh_interval_ms: 100\n")
                .unwrap();

        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/scrolls.json")));
        assert_eq!(config.refresh_interval_ms, 100);
    }
}
