use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};

use crate::core::affection::INITIAL_AFFECTION;
use crate::core::CompanionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_dir: PathBuf,
    /// Starting affection for every new session.
    pub initial_affection: i32,
    /// Pin the clock to this hour instead of reading local time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_hour: Option<u32>,
    /// `tracing` filter used when RUST_LOG is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub color: bool,
    /// Print the "(她覺得被理解)" style line after each reply.
    pub show_feedback: bool,
    /// Why the file on disk was ignored, if it was.
    #[serde(skip)]
    pub fallback: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            config_dir: PathBuf::new(),
            initial_affection: INITIAL_AFFECTION,
            fixed_hour: None,
            log_filter: None,
            color: true,
            show_feedback: true,
            fallback: None,
        }
    }
}

impl Config {
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("huizhen")
    }

    /// Load `config.json`, writing the defaults on first run.
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.unwrap_or_else(Self::default_dir);

        std::fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        let config_path = Self::path_in(&config_dir);

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            let reason = if config_str.trim().is_empty() {
                format!("config file {} is empty", config_path.display())
            } else {
                match serde_json::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        config.config_dir = config_dir;
                        config.validate()?;
                        return Ok(config);
                    }
                    Err(e) => format!("failed to parse {}: {}", config_path.display(), e),
                }
            };
            return Ok(Config { config_dir, fallback: Some(reason), ..Config::default() });
        }

        let config = Config { config_dir, ..Config::default() };
        config.save()?;
        Ok(config)
    }

    /// Log why defaults replaced the file. Called once logging is up, since
    /// the config decides the log filter.
    pub fn report_fallback(&self) {
        if let Some(reason) = &self.fallback {
            tracing::warn!("{}, using defaults", reason);
        }
    }

    pub fn save(&self) -> Result<()> {
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(self.config_file(), json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(hour) = self.fixed_hour {
            if hour > 23 {
                return Err(CompanionError::Config(format!("fixed_hour must be 0-23, got {}", hour)).into());
            }
        }
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        Self::path_in(&self.config_dir)
    }

    fn path_in(dir: &Path) -> PathBuf {
        dir.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.initial_affection, 50);
        assert!(config.fixed_hour.is_none());
        assert!(dir.path().join("config.json").exists());

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"fixed_hour": 21}"#).unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.fixed_hour, Some(21));
        assert_eq!(config.initial_affection, 50);
        assert!(config.show_feedback);
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"fixed_hour": 24}"#).unwrap();
        let err = Config::new(Some(dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("fixed_hour"));
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.initial_affection, 50);
        assert_eq!(config.config_dir, dir.path());
        assert!(config.fallback.as_deref().unwrap().contains("failed to parse"));
    }

    #[test]
    #[traced_test]
    fn test_fallback_is_logged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.report_fallback();
        assert!(logs_contain("failed to parse"));
        assert!(logs_contain("using defaults"));
    }

    #[test]
    #[traced_test]
    fn test_empty_file_is_logged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "  \n").unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.report_fallback();
        assert!(logs_contain("is empty"));
    }

    #[test]
    #[traced_test]
    fn test_clean_load_logs_nothing() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.report_fallback();
        assert!(config.fallback.is_none());
        assert!(!logs_contain("using defaults"));
    }
}
