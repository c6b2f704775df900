//! Context configuration

use athena_ports::StrategyId;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration of one strategy context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Id the engine registered the strategy under
    pub strategy_id: StrategyId,
    /// Strategy name, used in log lines
    pub name: String,
    /// Rows pulled when a caller asks for zero bars or ticks
    pub default_history_count: usize,
    /// Re-pull ticks from the engine on every query instead of serving the cache
    pub tick_cache_passthrough: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            strategy_id: 0,
            name: "hft".to_string(),
            default_history_count: 100,
            tick_cache_passthrough: true,
        }
    }
}

impl ContextConfig {
    pub fn new(strategy_id: StrategyId, name: impl Into<String>) -> Self {
        Self {
            strategy_id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("strategy name is empty".to_string()));
        }
        if self.default_history_count == 0 {
            return Err(Error::Config("default_history_count must be positive".to_string()));
        }
        Ok(())
    }
}
