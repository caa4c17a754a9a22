//! Immutable, insertion-ordered hash maps keyed by scalars
//!
//! This module provides:
//! - `ImmutableOpenHashMap`: build-once open-addressing map, one generic type
//!   for every scalar key type
//! - `MapCursor` and the key/value/entry views for insertion-order traversal
//! - `ScalarMap` / `MapMutation`: the read-only and mutator contracts
//! - Hash mixing and table sizing helpers shared by open-addressing tables

mod hash_functions;
mod immutable_open_hash_map;
mod iter;
mod link;
mod traits;
mod views;

pub use immutable_open_hash_map::ImmutableOpenHashMap;
pub use iter::{Iter, MapCursor};
pub use traits::{MapMutation, ScalarMap};
pub use views::{
    BasicEntry, Entries, EntrySet, FastEntries, KeySet, Keys, KeysFrom, MapEntry, MapView,
    Values, ValuesView,
};

// Export hash function utilities
pub use hash_functions::{
    array_size, check_load_factor, max_fill, mix32, mix64, DEFAULT_LOAD_FACTOR,
    FAST_LOAD_FACTOR, INT_PHI, LONG_PHI, MAX_TABLE_SIZE, VERY_FAST_LOAD_FACTOR,
};
