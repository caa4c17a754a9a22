//! Configuration APIs for primora
//!
//! Configuration covers the two tunable parts of the crate: how hash maps size
//! their tables and how the sort engine picks its cutoffs and parallelism.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides common functionality for all configuration types,
//! including validation, environment initialization, and preset management.
//!
//! # Core Configuration Types
//!
//! - [`HashMapConfig`]: load factor used when building hash maps
//! - [`SortConfig`]: thresholds and parallelism for [`ArraySorter`](crate::algorithms::ArraySorter)
//!
//! # Preset Configurations
//!
//! ```rust
//! use primora::config::{Config, HashMapConfig, SortConfig};
//!
//! // Sparse tables, shortest probe sequences
//! let map_config = HashMapConfig::performance_preset();
//!
//! // Never fork onto the thread pool
//! let sort_config = SortConfig::realtime_preset();
//! assert!(!sort_config.use_parallel);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use primora::config::{Config, SortConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Initialize from environment variables with PRIMORA_ prefix
//! let config = SortConfig::from_env()?;
//!
//! // Initialize from environment with custom prefix
//! let config = SortConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod hash_map;
pub mod sort;


pub use hash_map::HashMapConfig;
pub use sort::SortConfig;

/// Environment variable prefix used by [`Config::from_env`]
pub const ENV_PREFIX: &str = "PRIMORA_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err` with details if invalid.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `PRIMORA_{COMPONENT}_{FIELD}`.
    /// For example, `PRIMORA_MAP_LOAD_FACTOR=0.5` sets the hash map load factor.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Get a performance-optimized preset configuration.
    fn performance_preset() -> Self;

    /// Get a memory-optimized preset configuration.
    fn memory_preset() -> Self;

    /// Get a real-time preset configuration.
    ///
    /// This preset favors predictable latency over throughput.
    fn realtime_preset() -> Self;

    /// Get a balanced preset configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Utility function to parse environment variable with fallback to default.
///
/// Unset or unparsable variables yield `default`.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Utility function to parse boolean environment variable.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
