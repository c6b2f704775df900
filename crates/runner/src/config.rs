//! Runner configuration

use athena_context::ContextConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RunnerError};

/// Host configuration for one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Capacity of the engine event channel
    pub channel_capacity: usize,
    /// `env_logger` filter; `RUST_LOG` is used when absent
    pub log_filter: Option<String>,
    /// Context of the hosted strategy
    pub context: ContextConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 10000,
            log_filter: None,
            context: ContextConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| RunnerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(RunnerError::Config(
                "channel_capacity must be positive".to_string(),
            ));
        }
        self.context
            .validate()
            .map_err(|e| RunnerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.channel_capacity, 10000);
        assert!(config.log_filter.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let path = write_temp(
            "athena-runner-config",
            r#"{"log_filter": "debug", "context": {"strategy_id": 3, "name": "hft_au"}}"#,
        );

        let config = RunnerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.channel_capacity, 10000);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.context.strategy_id, 3);
        assert_eq!(config.context.default_history_count, 100);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_file_contents() {
        let path = write_temp("athena-runner-bad-config", r#"{"channel_capacity": 0}"#);
        assert!(matches!(
            RunnerConfig::from_json_file(&path),
            Err(RunnerError::Config(_))
        ));

        let path2 = write_temp("athena-runner-garbage", "not json");
        assert!(matches!(
            RunnerConfig::from_json_file(&path2),
            Err(RunnerError::Config(_))
        ));

        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path2);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RunnerConfig::from_json_file("/nonexistent/athena.json"),
            Err(RunnerError::Io(_))
        ));
    }
}
