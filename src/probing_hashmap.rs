use std::{fmt, iter::FusedIterator, mem, slice};

use tracing::{debug, trace};

use crate::{
    error::{MapError, Result},
    hashing::{HashFn, std_hash},
    primes::{is_prime, next_prime},
};

/// Capacity used by `ProbingHashMap::default`
pub const DEFAULT_CAPACITY: usize = 11;

/// The table grows before an insert once `len / capacity` reaches this ratio
const MAX_LOAD_FACTOR: f64 = 0.5;

/// A bucket containing a key-value pair
#[derive(Debug, Clone)]
struct Bucket<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Tombstone flag. Deleted buckets stay in place so probe chains through them survive.
    deleted: bool,
}

/// Where a probe for a key ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// The slot holds the key, live or tombstoned
    Found(usize),
    /// The first never-written slot on the probe sequence
    Vacant(usize),
    /// Every step of the probe hit a different key or a foreign tombstone
    Exhausted,
}

/// The quadratic probe sequence `(start + j^2) mod capacity` for `j in 0..capacity`
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Home slot of the key
    start: usize,
    /// `j^2 mod capacity`
    offset: usize,
    /// `j`
    step: usize,
    /// Number of slots in the table
    capacity: usize,
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    // `start` and `offset` are both below `capacity`, so no sum here can overflow for any
    // table that fits in memory.
    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let index = (self.start + self.offset) % self.capacity;
        // (j + 1)^2 = j^2 + 2j + 1
        self.offset = (self.offset + 2 * self.step + 1) % self.capacity;
        self.step += 1;
        Some(index)
    }
}

/// A hash map with string keys, open addressing and quadratic probing.
///
/// Collisions are resolved by probing `(h + j^2) mod capacity` for `j = 0, 1, 2, ...`, where
/// the capacity is kept prime. Removal leaves a tombstone behind so that lookups for keys
/// placed further along the same probe sequence keep working. The table doubles (to the
/// next prime) whenever an insert finds it at least half full.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingHashMap<V> {
    /// The buckets storing the key-value pairs
    buckets: Vec<Option<Bucket<V>>>,
    /// Number of live entries
    size: usize,
    /// Hash function, carried over to every table built by a resize
    hash_fn: HashFn,
}

impl<V> Default for ProbingHashMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, std_hash)
    }
}

impl<V> ProbingHashMap<V> {
    /// Creates a map with at least `capacity` slots, rounded up to an odd prime.
    ///
    /// # Panics
    ///
    /// Panics on allocation if `capacity` is so close to `usize::MAX` that no table of that
    /// size can exist.
    #[must_use]
    pub fn new(capacity: usize, hash_fn: HashFn) -> Self {
        // past the last prime in range the slot allocation itself overflows
        Self::with_exact_capacity(next_prime(capacity).unwrap_or(usize::MAX), hash_fn)
    }

    /// Creates a map using the standard library hasher
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, std_hash)
    }

    /// Allocates exactly `capacity` empty slots without rounding
    fn with_exact_capacity(capacity: usize, hash_fn: HashFn) -> Self {
        Self { buckets: empty_buckets(capacity), size: 0, hash_fn }
    }

    /// Probe sequence for `key` over the current table
    #[allow(clippy::cast_possible_truncation)]
    fn probe(&self, key: &str) -> QuadraticProbe {
        let capacity = self.buckets.len();
        // the remainder is below `capacity`, which is a `usize`
        let start = ((self.hash_fn)(key) % capacity as u64) as usize;
        QuadraticProbe { start, offset: 0, step: 0, capacity }
    }

    /// Walks the probe sequence for `key`.
    ///
    /// Live buckets holding other keys and tombstones of other keys never stop the walk;
    /// only a never-written slot or a bucket holding `key` does.
    fn locate(&self, key: &str) -> Lookup {
        for index in self.probe(key) {
            match self.buckets.get(index) {
                Some(None) => return Lookup::Vacant(index),
                Some(Some(bucket)) if bucket.key == key => return Lookup::Found(index),
                _ => {}
            }
        }
        Lookup::Exhausted
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.locate(key) {
            Lookup::Found(index) => match self.buckets.get(index) {
                Some(Some(bucket)) if !bucket.deleted => Some(&bucket.value),
                _ => None,
            },
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.locate(key) {
            Lookup::Found(index) => match self.buckets.get_mut(index) {
                Some(Some(bucket)) if !bucket.deleted => Some(&mut bucket.value),
                _ => None,
            },
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of slots a lookup of `key` examines before it stops
    #[must_use]
    pub fn probe_count(&self, key: &str) -> usize {
        self.probe(key)
            .position(|index| {
                !matches!(self.buckets.get(index), Some(Some(bucket)) if bucket.key != key)
            })
            .map_or(self.capacity(), |position| position.saturating_add(1))
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Same as [`ProbingHashMap::len`]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Number of slots available to new keys: never-written slots plus tombstones
    #[must_use]
    pub fn count_empty_slots(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.as_ref().is_none_or(|bucket| bucket.deleted)).count()
    }

    /// Removes every entry and tombstone, keeping the current capacity
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.size = 0;
        trace!(capacity = self.capacity(), "cleared map");
    }

    /// Returns an iterator over the live key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter() }
    }
}

impl<V: Clone> ProbingHashMap<V> {
    /// Inserts a key-value pair, returning the previous value if the key was live.
    ///
    /// The load factor is checked before the new entry is counted, so a single insert may
    /// leave the table slightly above one half until the next insert grows it.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.grow();
        }

        loop {
            match self.locate(&key) {
                Lookup::Found(index) | Lookup::Vacant(index) => {
                    return self.fill(index, key, value);
                }
                Lookup::Exhausted => {
                    debug!(
                        capacity = self.capacity(),
                        size = self.size,
                        "probe sequence exhausted, rebuilding"
                    );
                    self.grow();
                }
            }
        }
    }

    /// Alias of [`ProbingHashMap::put`]
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.put(key, value)
    }

    /// Writes into a slot returned by `locate`
    #[allow(clippy::indexing_slicing)]
    fn fill(&mut self, index: usize, key: String, value: V) -> Option<V> {
        // `locate` only yields indices from the probe, which are all below capacity
        let slot = &mut self.buckets[index];
        match slot {
            Some(bucket) if !bucket.deleted => Some(mem::replace(&mut bucket.value, value)),
            _ => {
                *slot = Some(Bucket { key, value, deleted: false });
                self.size = self.size.saturating_add(1);
                None
            }
        }
    }

    /// Removes a key, leaving a tombstone in its slot
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let Lookup::Found(index) = self.locate(key) else {
            return None;
        };
        match self.buckets.get_mut(index) {
            Some(Some(bucket)) if !bucket.deleted => {
                bucket.deleted = true;
                self.size = self.size.saturating_sub(1);
                Some(bucket.value.clone())
            }
            _ => None,
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots.
    ///
    /// Requests below the current size, and requests with no prime capacity in range, are
    /// ignored; use [`ProbingHashMap::try_resize`] to observe the refusal.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            debug!(%err, "resize refused");
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots.
    ///
    /// The capacity is rounded up to the next prime unless it already is one, so a request
    /// for 2 gives exactly 2 slots. Live entries are reinserted into the new table with
    /// [`ProbingHashMap::put`], which may grow it further; tombstones are dropped.
    ///
    /// # Errors
    ///
    /// Leaves the map untouched and returns
    /// - [`MapError::CapacityBelowSize`] if `new_capacity` is smaller than the number of
    ///   live entries;
    /// - [`MapError::CapacityOverflow`] if no prime at or above `new_capacity` fits in a
    ///   `usize`.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.size {
            return Err(MapError::CapacityBelowSize { requested: new_capacity, size: self.size });
        }

        let capacity = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
                .ok_or(MapError::CapacityOverflow { requested: new_capacity })?
        };
        let mut new_table = Self::with_exact_capacity(capacity, self.hash_fn);

        for bucket in self.buckets.iter().flatten().filter(|bucket| !bucket.deleted) {
            new_table.put(bucket.key.clone(), bucket.value.clone());
        }

        debug!(
            requested = new_capacity,
            from = self.capacity(),
            to = new_table.capacity(),
            size = self.size,
            "resized table"
        );

        // Replace the current table with the new one
        *self = new_table;
        Ok(())
    }

    /// Doubles the capacity
    fn grow(&mut self) {
        self.resize(self.capacity().saturating_mul(2));
    }

    /// Returns the live key-value pairs in slot order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}

impl<V: Clone> Extend<(String, V)> for ProbingHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: Clone> FromIterator<(String, V)> for ProbingHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<V: fmt::Display> fmt::Display for ProbingHashMap<V> {
    /// Dumps one line per slot
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                None => writeln!(f, "{index}: None")?,
                Some(bucket) if bucket.deleted => {
                    writeln!(f, "{index}: K: {} V: {} (tombstone)", bucket.key, bucket.value)?;
                }
                Some(bucket) => writeln!(f, "{index}: K: {} V: {}", bucket.key, bucket.value)?,
            }
        }
        Ok(())
    }
}

impl<'a, V> IntoIterator for &'a ProbingHashMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds `capacity` never-written slots
fn empty_buckets<V>(capacity: usize) -> Vec<Option<Bucket<V>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Iterator over the live key-value pairs of the map, in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    buckets: slice::Iter<'a, Option<Bucket<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.buckets.find_map(|slot| match slot {
            Some(bucket) if !bucket.deleted => Some((&bucket.key, &bucket.value)),
            _ => None,
        })
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
