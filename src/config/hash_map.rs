//! Hash map construction configuration.

use super::{parse_env_var, Config};
use crate::error::{PrimoraError, Result};
use crate::hash_map::{
    check_load_factor, DEFAULT_LOAD_FACTOR, FAST_LOAD_FACTOR, VERY_FAST_LOAD_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied when building an
/// [`ImmutableOpenHashMap`](crate::hash_map::ImmutableOpenHashMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashMapConfig {
    /// Target ratio of entries to table slots, strictly between 0 and 1
    pub load_factor: f32,
}

impl Default for HashMapConfig {
    fn default() -> Self {
        Self {
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config for HashMapConfig {
    fn validate(&self) -> Result<()> {
        check_load_factor(self.load_factor)
            .map_err(|e| PrimoraError::configuration(format!("load_factor: {}", e)))
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.load_factor =
            parse_env_var(&format!("{}MAP_LOAD_FACTOR", prefix), config.load_factor);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self { load_factor: VERY_FAST_LOAD_FACTOR }
    }

    fn memory_preset() -> Self {
        Self { load_factor: 0.9 }
    }

    fn realtime_preset() -> Self {
        Self { load_factor: FAST_LOAD_FACTOR }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            PrimoraError::configuration(format!("Failed to serialize hash map config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PrimoraError::configuration(format!("Failed to parse hash map config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
