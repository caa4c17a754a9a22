//! Configured sorting facade
//!
//! [`ArraySorter`] applies a [`SortConfig`]: it picks the parallel or the
//! sequential routine per call from the configured thresholds and records
//! statistics about the last run.

use super::merge_sort::{merge_sort_with, parallel_merge_sort_with};
use super::quick_sort::{parallel_quick_sort_with, quick_sort_with};
use super::{parallelism_available, AlgorithmStats, Thresholds};
use crate::config::{Config, SortConfig};
use crate::error::Result;
use crate::scalar::NaturalOrder;
use std::cmp::Ordering;
use std::mem;
use std::time::Instant;

/// Sorter driven by a [`SortConfig`]
pub struct ArraySorter {
    config: SortConfig,
    stats: AlgorithmStats,
}

impl ArraySorter {
    /// Create a sorter with the default configuration
    pub fn new() -> Self {
        Self::with_config(SortConfig::default())
    }

    /// Create a sorter with custom configuration
    pub fn with_config(config: SortConfig) -> Self {
        Self {
            config,
            stats: AlgorithmStats::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Statistics of the last sort
    pub fn stats(&self) -> &AlgorithmStats {
        &self.stats
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds {
            base: self.config.base_threshold,
            median_of_nine: self.config.median_of_nine_threshold,
            parallel: self.config.parallel_threshold,
        }
    }

    fn should_parallelize(&self, len: usize) -> bool {
        self.config.use_parallel
            && len >= self.config.parallel_threshold
            && parallelism_available()
    }

    /// Stable sort in natural order
    pub fn sort_stable<T>(&mut self, data: &mut [T]) -> Result<()>
    where
        T: Copy + Send + NaturalOrder,
    {
        self.sort_stable_by(data, T::natural_cmp)
    }

    /// Stable sort under `cmp`
    pub fn sort_stable_by<T, F>(&mut self, data: &mut [T], cmp: F) -> Result<()>
    where
        T: Copy + Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        self.config.validate()?;
        let start_time = Instant::now();
        let thresholds = self.thresholds();
        let used_parallel = self.should_parallelize(data.len());

        log::debug!(
            "stable sort of {} elements ({})",
            data.len(),
            if used_parallel { "parallel" } else { "sequential" }
        );

        if used_parallel {
            parallel_merge_sort_with(data, &cmp, thresholds);
        } else {
            merge_sort_with(data, &mut |x: &T, y: &T| cmp(x, y), thresholds);
        }

        let memory_used = if data.len() < thresholds.base {
            0
        } else {
            data.len() * mem::size_of::<T>()
        };
        self.record(data.len(), start_time, memory_used, used_parallel);
        Ok(())
    }

    /// Unstable sort in natural order
    pub fn sort_unstable<T>(&mut self, data: &mut [T]) -> Result<()>
    where
        T: Copy + Send + NaturalOrder,
    {
        self.sort_unstable_by(data, T::natural_cmp)
    }

    /// Unstable sort under `cmp`
    pub fn sort_unstable_by<T, F>(&mut self, data: &mut [T], cmp: F) -> Result<()>
    where
        T: Copy + Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        self.config.validate()?;
        let start_time = Instant::now();
        let thresholds = self.thresholds();
        let used_parallel = self.should_parallelize(data.len());

        log::debug!(
            "unstable sort of {} elements ({})",
            data.len(),
            if used_parallel { "parallel" } else { "sequential" }
        );

        if used_parallel {
            parallel_quick_sort_with(data, &cmp, thresholds);
        } else {
            quick_sort_with(data, &mut |x: &T, y: &T| cmp(x, y), thresholds);
        }

        self.record(data.len(), start_time, 0, used_parallel);
        Ok(())
    }

    fn record(
        &mut self,
        items: usize,
        start_time: Instant,
        memory_used: usize,
        used_parallel: bool,
    ) {
        self.stats = AlgorithmStats {
            items_processed: items,
            processing_time_us: start_time.elapsed().as_micros() as u64,
            memory_used,
            used_parallel,
        };
    }
}

impl Default for ArraySorter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::with_pool;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vec(len: usize, seed: u64) -> Vec<u32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(0..10_000)).collect()
    }

    #[test]
    fn test_sorter_basic() {
        let mut sorter = ArraySorter::new();
        let mut data = vec![5, 3, 1, 4, 1, 5, 9, 2, 6];
        sorter.sort_unstable(&mut data).unwrap();
        assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
        assert_eq!(sorter.stats().items_processed, 9);
        assert!(!sorter.stats().used_parallel);
        assert_eq!(sorter.stats().memory_used, 0);

        let mut data = vec![5, 3, 1, 4, 1, 5, 9, 2, 6];
        sorter.sort_stable(&mut data).unwrap();
        assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
    }

    #[test]
    fn test_sorter_custom_thresholds() {
        let config = SortConfig {
            base_threshold: 4,
            median_of_nine_threshold: 8,
            parallel_threshold: 64,
            use_parallel: true,
        };
        let mut sorter = ArraySorter::with_config(config);

        let v = random_vec(5000, 1);
        let mut expected = v.clone();
        expected.sort();

        let mut unstable = v.clone();
        sorter.sort_unstable(&mut unstable).unwrap();
        assert_eq!(unstable, expected);

        let mut stable = v;
        sorter.sort_stable(&mut stable).unwrap();
        assert_eq!(stable, expected);
        assert_eq!(sorter.stats().items_processed, 5000);
        assert_eq!(sorter.stats().memory_used, 5000 * 4);
    }

    #[test]
    fn test_sorter_sequential_when_disabled() {
        let mut sorter = ArraySorter::with_config(SortConfig::realtime_preset());
        let mut data = random_vec(20_000, 2);
        sorter.sort_unstable(&mut data).unwrap();
        assert!(data.windows(2).all(|w| w[0] <= w[1]));
        assert!(!sorter.stats().used_parallel);
    }

    #[test]
    fn test_sorter_stable_by_keeps_ties() {
        let mut sorter = ArraySorter::new();
        let mut pairs: Vec<(u8, u16)> = (0..20_000u16).map(|i| ((i % 7) as u8, i)).collect();
        sorter.sort_stable_by(&mut pairs, |a, b| a.0.cmp(&b.0)).unwrap();
        for w in pairs.windows(2) {
            assert!(w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1));
        }
    }

    #[test]
    fn test_sorter_rejects_invalid_config() {
        let config = SortConfig {
            base_threshold: 0,
            ..SortConfig::default()
        };
        let mut sorter = ArraySorter::with_config(config);
        let mut data = vec![3, 2, 1];
        let err = sorter.sort_unstable(&mut data).unwrap_err();
        assert_eq!(err.category(), "config");
        assert_eq!(data, vec![3, 2, 1]);
    }

    #[test]
    fn test_sorter_parallel_unstable_matches_sequential_on_ties() {
        let mut rng = StdRng::seed_from_u64(13);
        let tagged: Vec<(u8, u32)> = (0..4_000).map(|i| (rng.gen_range(0..8), i)).collect();
        let by_key = |a: &(u8, u32), b: &(u8, u32)| a.0.cmp(&b.0);

        let config = SortConfig {
            base_threshold: 16,
            median_of_nine_threshold: 128,
            parallel_threshold: 16,
            use_parallel: true,
        };
        let mut sequential = tagged.clone();
        ArraySorter::with_config(SortConfig {
            use_parallel: false,
            ..config.clone()
        })
        .sort_unstable_by(&mut sequential, by_key)
        .unwrap();

        let mut parallel = tagged.clone();
        let mut sorter = ArraySorter::with_config(config.clone());
        with_pool(4, || sorter.sort_unstable_by(&mut parallel, by_key)).unwrap();
        assert!(sorter.stats().used_parallel);
        assert_eq!(parallel, sequential);

        // A cutoff below the base case is refused before any work is done
        let mut sorter = ArraySorter::with_config(SortConfig {
            parallel_threshold: 2,
            ..config
        });
        let mut data = tagged;
        let err = with_pool(4, || sorter.sort_unstable_by(&mut data, by_key)).unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(!sorter.stats().used_parallel);
    }
}
