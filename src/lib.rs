//! bucket-map: a string-keyed hash map built directly on an array of
//! buckets with separate chaining and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: average O(1) `set`/`get`/`has`/`remove` with a storage engine
//!   small enough to reason about in full.
//! - Layers:
//!   - `hasher::bucket_index`: polynomial rolling hash (multiplier 31) over
//!     UTF-16 code units, reduced modulo the current capacity at every step.
//!   - `Chain<V>`: ordered `(key, value)` entries sharing one bucket; keys
//!     are distinct within a chain.
//!   - `BucketMap<V>`: the bucket array (`Option<Chain<V>>` per slot), the
//!     growth check, and the public API.
//!
//! Constraints
//! - Single-threaded and synchronous. Every operation takes `&self` or
//!   `&mut self`; callers sharing a map across threads wrap the whole map
//!   in one lock since growth replaces the entire bucket array.
//! - Keys are strings. Lookups take `&str`, `set` takes `impl Into<String>`,
//!   so non-string keys do not type-check.
//! - Absence is a value: `get` returns `Option<&V>`, `remove` returns
//!   `bool`. Nothing here returns an error after construction.
//!
//! Bucket invariants
//! - A slot is either empty (`None`) or holds a non-empty chain. A chain
//!   is created on the first insert into an empty slot and the slot is
//!   reset to empty when its last entry is removed.
//! - `len` equals the total number of entries across all chains.
//! - Every key sits in the bucket `bucket_index(key, capacity)` names.
//!
//! Growth
//! - Checked at the start of `set`, before the key is indexed:
//!   `len / capacity >= load_factor` doubles the capacity. The check uses
//!   the pre-insertion size, so a map may sit one entry past the nominal
//!   threshold until the next `set`.
//! - Growth allocates a fresh all-empty bucket array and reinserts every
//!   entry in bucket-then-chain order through the same path `set` uses,
//!   load check included, which rehashes against the new capacity. With a
//!   small load factor a reinsert can trigger a nested growth, so one `set`
//!   may double the capacity more than once. The old array is dropped.
//! - Capacity never shrinks, neither on `remove` nor on `clear`.
//!
//! Diagnostics
//! - Debug builds verify the touched bucket after every `set`/`remove`,
//!   and the whole structure after growth and `clear`. Release builds
//!   compile the checks out.
//!
//! Iteration
//! - `keys`, `values` and `entries` return owned snapshots; `iter` and
//!   `iter_mut` borrow. All visit buckets in index order and entries in
//!   chain order. That order is an artifact of the hash, not a contract.

mod chain;
pub mod config;
pub mod hasher;
mod map;
mod map_proptest;

// Public surface
pub use config::{Config, ConfigError, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use map::{BucketMap, Iter, IterMut};
