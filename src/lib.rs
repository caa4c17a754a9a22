//! # Primora: Scalar-Specialized Collections and Array Algorithms
//!
//! This crate provides collections and array utilities for primitive scalars,
//! written once over generic scalar traits instead of once per primitive type.
//!
//! ## Key Features
//!
//! - **Immutable Hash Maps**: Build-once open-addressing maps with insertion-ordered
//!   iteration, bidirectional cursors and allocation-free views
//! - **Sort Engine**: Insertion, selection, merge (buffered and memory-free),
//!   three-way quick and heap sort over slices, in natural order or by comparator
//! - **Parallel Sorting**: Fork-join quick and merge sort on the rayon pool
//! - **Heap Maintenance**: `shift_down`, `shift_up` and `heapify` on slice-backed heaps
//! - **Configuration**: Validated, serde-backed configs loadable from the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use primora::{ImmutableOpenHashMap, MapView};
//! use primora::algorithms::{merge_sort, quick_sort};
//!
//! // Immutable map: later duplicates win, first occurrence keeps its place
//! let map = ImmutableOpenHashMap::<i16, i32>::new(&[5, 0, 5, 3], &[10, 20, 99, 30]).unwrap();
//! assert_eq!(map.get(5), Some(&99));
//! assert_eq!(map.key_set().iter().collect::<Vec<_>>(), vec![5, 0, 3]);
//!
//! // Bidirectional traversal
//! let mut cursor = map.cursor_from(0).unwrap();
//! assert_eq!(cursor.next_entry().unwrap(), (3, &30));
//!
//! // Sorting
//! let mut data = vec![5, 3, 1, 4, 1, 5, 9, 2, 6];
//! quick_sort(&mut data);
//! assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
//!
//! let mut floats = vec![2.5f64, -0.0, 0.0, f64::NAN, -1.0];
//! merge_sort(&mut floats);
//! assert_eq!(floats[0], -1.0);
//! assert!(floats[4].is_nan());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod hash_map;
pub mod scalar;

// Re-export core types
pub use algorithms::{AlgorithmStats, ArraySorter};
pub use config::{Config, HashMapConfig, SortConfig};
pub use error::{PrimoraError, Result};
pub use hash_map::{
    BasicEntry, EntrySet, ImmutableOpenHashMap, KeySet, MapCursor, MapEntry, MapMutation,
    MapView, ScalarMap, ValuesView,
};
pub use scalar::{NaturalOrder, ScalarKey};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library; logs the version and the rayon pool size
pub fn init() {
    log::debug!(
        "Initializing primora v{} ({} rayon threads)",
        VERSION,
        rayon::current_num_threads()
    );
}
