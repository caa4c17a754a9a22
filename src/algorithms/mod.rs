//! Array sorting and heap algorithms over scalar slices
//!
//! Every routine works in place on a caller-owned slice, either in the
//! element's natural order ([`NaturalOrder`](crate::scalar::NaturalOrder)) or
//! under a comparator closure (the `*_by` variants). Ranged variants validate
//! `from..to` up front and never truncate or wrap.
//!
//! - Insertion and selection sort, the small-slice base cases
//! - Merge sort (buffered, stable) and its memory-free in-place variant
//! - Three-way quicksort with median-of-3 / ninther pivots
//! - Heap sort and binary-heap maintenance
//! - Fork-join parallel quick, merge and memory-free merge sort on the rayon pool
//! - Fisher–Yates shuffle and reversal

pub mod bounds;
pub mod heap;
pub mod merge_sort;
pub mod permute;
pub mod quick_sort;
pub mod simple_sort;
pub mod sorter;

// Re-export main types
pub use bounds::{ensure_from_to, ensure_offset_length};
pub use heap::{
    heap_sort, heap_sort_by, heap_sort_range, heap_sort_range_by, heapify, heapify_natural,
    shift_down, shift_down_natural, shift_up, shift_up_natural,
};
pub use merge_sort::{
    in_place_merge_sort, in_place_merge_sort_by, in_place_merge_sort_range,
    in_place_merge_sort_range_by, merge_sort, merge_sort_by, merge_sort_range,
    merge_sort_range_by, parallel_in_place_merge_sort, parallel_in_place_merge_sort_by,
    parallel_merge_sort, parallel_merge_sort_by, parallel_merge_sort_range_by, stable_sort,
};
pub use permute::{reverse, reverse_range, shuffle, shuffle_range};
pub use quick_sort::{
    parallel_quick_sort, parallel_quick_sort_by, parallel_quick_sort_range_by, quick_sort,
    quick_sort_by, quick_sort_range, quick_sort_range_by, unstable_sort,
};
pub use simple_sort::{
    insertion_sort, insertion_sort_by, insertion_sort_range, selection_sort, selection_sort_by,
    selection_sort_range,
};
pub use sorter::ArraySorter;

/// Slices shorter than this are finished by insertion or selection sort
pub const BASE_THRESHOLD: usize = 16;

/// Above this length quicksort picks its pivot as a ninther
pub const MEDIAN_OF_NINE_THRESHOLD: usize = 128;

/// Below this length parallel sorts run sequentially
pub const PARALLEL_THRESHOLD: usize = 8192;

/// Cutoffs steering the recursive sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Thresholds {
    pub(crate) base: usize,
    pub(crate) median_of_nine: usize,
    pub(crate) parallel: usize,
}

impl Thresholds {
    pub(crate) const DEFAULT: Self = Self {
        base: BASE_THRESHOLD,
        median_of_nine: MEDIAN_OF_NINE_THRESHOLD,
        parallel: PARALLEL_THRESHOLD,
    };

    /// Shortest slice a parallel sort forks on; never below the base case
    #[inline]
    pub(crate) fn fork_cutoff(&self) -> usize {
        self.parallel.max(self.base)
    }
}

/// Run `f` on a dedicated pool of `threads` workers
#[cfg(test)]
pub(crate) fn with_pool<R: Send>(threads: usize, f: impl FnOnce() -> R + Send) -> R {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool")
        .install(f)
}

/// True when a fork-join split can actually run on more than one thread
#[inline]
pub(crate) fn parallelism_available() -> bool {
    rayon::current_num_threads() > 1
}

/// Performance statistics for algorithm execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgorithmStats {
    /// Total items processed
    pub items_processed: usize,
    /// Processing time in microseconds
    pub processing_time_us: u64,
    /// Auxiliary memory used in bytes
    pub memory_used: usize,
    /// Whether parallel processing was used
    pub used_parallel: bool,
}

impl AlgorithmStats {
    /// Calculate processing rate in items per second
    pub fn items_per_second(&self) -> f64 {
        if self.processing_time_us == 0 {
            return 0.0;
        }
        (self.items_processed as f64) / (self.processing_time_us as f64 / 1_000_000.0)
    }
}
