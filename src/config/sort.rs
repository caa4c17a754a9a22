//! Sort engine configuration.

use super::{parse_env_bool, parse_env_var, Config};
use crate::algorithms::{BASE_THRESHOLD, MEDIAN_OF_NINE_THRESHOLD, PARALLEL_THRESHOLD};
use crate::error::{PrimoraError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cutoffs and parallelism for [`ArraySorter`](crate::algorithms::ArraySorter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Slices shorter than this are finished by a quadratic sort
    pub base_threshold: usize,
    /// Quicksort samples a ninther above this length
    pub median_of_nine_threshold: usize,
    /// Slices at least this long are sorted on the thread pool
    pub parallel_threshold: usize,
    /// Allow parallel sorting at all
    pub use_parallel: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            base_threshold: BASE_THRESHOLD,
            median_of_nine_threshold: MEDIAN_OF_NINE_THRESHOLD,
            parallel_threshold: PARALLEL_THRESHOLD,
            use_parallel: true,
        }
    }
}

impl Config for SortConfig {
    fn validate(&self) -> Result<()> {
        if self.base_threshold < 2 {
            return Err(PrimoraError::configuration(format!(
                "base_threshold must be at least 2, got {}",
                self.base_threshold
            )));
        }
        if self.median_of_nine_threshold < self.base_threshold {
            return Err(PrimoraError::configuration(format!(
                "median_of_nine_threshold ({}) must not be below base_threshold ({})",
                self.median_of_nine_threshold, self.base_threshold
            )));
        }
        if self.parallel_threshold < self.base_threshold {
            return Err(PrimoraError::configuration(format!(
                "parallel_threshold ({}) must not be below base_threshold ({})",
                self.parallel_threshold, self.base_threshold
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.base_threshold =
            parse_env_var(&format!("{}SORT_BASE_THRESHOLD", prefix), config.base_threshold);
        config.median_of_nine_threshold = parse_env_var(
            &format!("{}SORT_MEDIAN_OF_NINE_THRESHOLD", prefix),
            config.median_of_nine_threshold,
        );
        config.parallel_threshold = parse_env_var(
            &format!("{}SORT_PARALLEL_THRESHOLD", prefix),
            config.parallel_threshold,
        );
        config.use_parallel =
            parse_env_bool(&format!("{}SORT_USE_PARALLEL", prefix), config.use_parallel);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            base_threshold: 24,
            median_of_nine_threshold: 64,
            parallel_threshold: 4096,
            use_parallel: true,
        }
    }

    fn memory_preset() -> Self {
        Self {
            base_threshold: BASE_THRESHOLD,
            median_of_nine_threshold: MEDIAN_OF_NINE_THRESHOLD,
            parallel_threshold: 1 << 16,
            use_parallel: false,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            base_threshold: BASE_THRESHOLD,
            median_of_nine_threshold: 64,
            parallel_threshold: PARALLEL_THRESHOLD,
            use_parallel: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            PrimoraError::configuration(format!("Failed to serialize sort config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PrimoraError::configuration(format!("Failed to parse sort config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
