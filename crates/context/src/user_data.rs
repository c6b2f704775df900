//! User Data Store
//!
//! Typed key/value passthrough to the engine's per-strategy storage.
//! Values are stored as text and converted back on load.

use athena_ports::{HftEngine, StrategyId};
use log::trace;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct UserDataStore {
    strategy: StrategyId,
}

impl UserDataStore {
    pub fn new(strategy: StrategyId) -> Self {
        Self { strategy }
    }

    /// Store the text representation of `value`
    pub fn save<E: HftEngine + ?Sized, T: Display>(&self, engine: &mut E, key: &str, value: T) {
        let text = value.to_string();
        trace!("[{}] save {}={}", self.strategy, key, text);
        engine.save_user_data(self.strategy, key, &text);
    }

    /// Load `key`, parsing the stored text as `T`
    ///
    /// Returns `default` untouched when nothing (or empty text) is stored.
    pub fn load<E, T>(&self, engine: &E, key: &str, default: T) -> Result<T>
    where
        E: HftEngine + ?Sized,
        T: FromStr,
        T::Err: Display,
    {
        self.load_with(engine, key, default, str::parse::<T>)
    }

    /// Load `key`, converting the stored text with `convert`
    ///
    /// A conversion failure is reported, never replaced by the default.
    pub fn load_with<E, T, F, CE>(&self, engine: &E, key: &str, default: T, convert: F) -> Result<T>
    where
        E: HftEngine + ?Sized,
        F: FnOnce(&str) -> std::result::Result<T, CE>,
        CE: Display,
    {
        let text = engine.load_user_data(self.strategy, key, "");
        if text.is_empty() {
            return Ok(default);
        }

        convert(&text).map_err(|e| Error::Conversion {
            key: key.to_string(),
            text,
            reason: e.to_string(),
        })
    }
}
