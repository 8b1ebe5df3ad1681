//! # Quadratic Probing Hash Map
//!
//! A Rust implementation of an open addressing hash table with quadratic probing.
//!
//! `ProbingHashMap` stores string keys in a single array of slots whose length is always a
//! prime. Collisions walk the sequence `(h + j^2) mod capacity`; removals leave tombstones
//! so that keys further down a probe chain stay reachable; and the table doubles to the
//! next prime whenever an insert finds it half full.
//!
//! The hash function is pluggable: any `fn(&str) -> u64` can be passed at construction
//! and is reused by every table built during a resize.
//!
//! ## Basic Usage
//!
//! ```rust
//! use quadmap::{ProbingHashMap, hash_function_2};
//!
//! // Capacity is rounded up to the next prime
//! let mut map = ProbingHashMap::new(10, hash_function_2);
//! assert_eq!(map.capacity(), 11);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values, leaving a tombstone behind
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.count_empty_slots(), 10);
//! ```
//!
//! ## Resizing
//!
//! ```rust
//! use quadmap::{MapError, ProbingHashMap, hash_function_1};
//!
//! let mut map = ProbingHashMap::new(20, hash_function_1);
//! map.put("key1".to_string(), 10);
//!
//! map.resize(30);
//! assert_eq!(map.capacity(), 31);
//!
//! // Shrinking below the number of live entries is refused
//! map.put("key2".to_string(), 20);
//! assert_eq!(map.try_resize(1), Err(MapError::CapacityBelowSize { requested: 1, size: 2 }));
//! assert_eq!(map.capacity(), 31);
//! ```

/// Errors returned by fallible map operations
mod error;
/// Hash functions for string keys
mod hashing;
/// Primality helpers for table capacities
mod primes;
/// Module implementing the quadratic probing hash map
mod probing_hashmap;
/// Utility functions and traits for the hash map
mod utils;

pub use error::{MapError, Result};
pub use hashing::{HashFn, hash_function_1, hash_function_2, std_hash};
pub use primes::{is_prime, next_prime};
pub use probing_hashmap::{DEFAULT_CAPACITY, Iter, ProbingHashMap};
pub use utils::{HashMapExtensions, from_iter};
