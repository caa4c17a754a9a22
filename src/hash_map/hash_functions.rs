//! Hash mixing and table sizing for open-addressing tables
//!
//! Keys are hashed by a golden-ratio multiply followed by a xor-shift so that the
//! low bits, which select the bucket under a power-of-two mask, depend on every
//! input bit. Table sizes are always powers of two.
//!
//! # Usage
//!
//! ```rust
//! use primora::hash_map::{array_size, mix32, DEFAULT_LOAD_FACTOR};
//!
//! let size = array_size(100, DEFAULT_LOAD_FACTOR).unwrap();
//! assert!(size.is_power_of_two());
//! assert!(size as f32 * DEFAULT_LOAD_FACTOR >= 100.0);
//!
//! assert_ne!(mix32(1) & 0xff, mix32(2) & 0xff);
//! ```

use crate::error::{PrimoraError, Result};

/// 2^32 / φ, the 32-bit golden ratio multiplier
pub const INT_PHI: u32 = 0x9E37_79B9;

/// 2^64 / φ, the 64-bit golden ratio multiplier
pub const LONG_PHI: u64 = 0x9E37_79B9_7F4A_7C15;

/// Load factor used when none is given
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Load factor for tables that favor lookup speed over memory
pub const FAST_LOAD_FACTOR: f32 = 0.5;

/// Load factor for tables that favor memory over lookup speed
pub const VERY_FAST_LOAD_FACTOR: f32 = 0.25;

/// Largest table a map will allocate
pub const MAX_TABLE_SIZE: usize = 1 << 30;

/// Spread the bits of a 32-bit hash
#[inline]
pub fn mix32(x: u32) -> u32 {
    let h = x.wrapping_mul(INT_PHI);
    h ^ (h >> 16)
}

/// Spread the bits of a 64-bit hash
#[inline]
pub fn mix64(x: u64) -> u64 {
    let mut h = x.wrapping_mul(LONG_PHI);
    h ^= h >> 32;
    h ^ (h >> 16)
}

/// Validate a load factor: finite and strictly between 0 and 1
pub fn check_load_factor(load_factor: f32) -> Result<()> {
    if !load_factor.is_finite() || load_factor <= 0.0 || load_factor >= 1.0 {
        return Err(PrimoraError::invalid_argument(format!(
            "load factor must be greater than 0 and smaller than 1, got {}",
            load_factor
        )));
    }
    Ok(())
}

/// Smallest power-of-two table size (at least 2) that holds `expected`
/// entries under `load_factor`
pub fn array_size(expected: usize, load_factor: f32) -> Result<usize> {
    check_load_factor(load_factor)?;
    let needed = (expected as f64 / load_factor as f64).ceil();
    if needed > MAX_TABLE_SIZE as f64 {
        return Err(PrimoraError::invalid_argument(format!(
            "too large ({} expected elements with load factor {})",
            expected, load_factor
        )));
    }
    let size = (needed as usize).max(2).next_power_of_two();
    if size > MAX_TABLE_SIZE {
        return Err(PrimoraError::invalid_argument(format!(
            "too large ({} expected elements with load factor {})",
            expected, load_factor
        )));
    }
    Ok(size)
}

/// Maximum number of entries a table of size `n` holds under `load_factor`.
/// Always leaves at least one slot free.
pub fn max_fill(n: usize, load_factor: f32) -> usize {
    let fill = (n as f64 * load_factor as f64).ceil() as usize;
    fill.min(n.saturating_sub(1))
}
