//! Hash functions for string keys
//!
//! The map treats hashing as a pluggable dependency: any deterministic `fn(&str) -> u64`
//! works. The two simple functions below are cheap and predictable, which makes them useful
//! for reasoning about collisions in tests. `std_hash` adapts the standard library hasher.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// A deterministic function mapping a string key to a non-negative integer
pub type HashFn = fn(&str) -> u64;

/// Unicode scalar value of a character
fn code_point(c: char) -> u64 {
    u64::from(u32::from(c))
}

/// Sums the code point values of the key.
///
/// Anagrams collide, so this is a deliberately weak distribution.
#[must_use]
pub fn hash_function_1(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, c| hash.wrapping_add(code_point(c)))
}

/// Sums the code point values of the key, each weighted by its 1-based character position.
#[must_use]
pub fn hash_function_2(key: &str) -> u64 {
    key.chars().zip(1_u64..).fold(0_u64, |hash, (c, position)| {
        hash.wrapping_add(position.wrapping_mul(code_point(c)))
    })
}

/// Hashes the key with the standard library `DefaultHasher`
#[must_use]
pub fn std_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function_1_sums_bytes() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("a"), 97);
        assert_eq!(hash_function_1("ab"), 97 + 98);
        assert_eq!(hash_function_1("ab"), hash_function_1("ba"));
    }

    #[test]
    fn test_hash_function_2_weights_positions() {
        assert_eq!(hash_function_2(""), 0);
        assert_eq!(hash_function_2("a"), 97);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_ne!(hash_function_2("ab"), hash_function_2("ba"));
    }

    #[test]
    fn test_hashes_use_code_points_not_bytes() {
        assert_eq!(hash_function_1("é"), 233);
        assert_eq!(hash_function_1("aé"), 97 + 233);
        assert_eq!(hash_function_2("é"), 233);
        // positions count characters, so the two-byte 'é' does not shift 'b'
        assert_eq!(hash_function_2("éb"), 233 + 2 * 98);
    }

    #[test]
    fn test_std_hash_is_deterministic() {
        assert_eq!(std_hash("key1"), std_hash("key1"));
    }
}
