//! BucketMap: bucket array, chaining and growth behind one map API.

use crate::chain::{Chain, Entry};
use crate::config::{Config, ConfigError};
use crate::hasher::bucket_index;
use core::fmt;

/// One slot of the bucket array: empty, or an occupied non-empty chain.
type Bucket<V> = Option<Chain<V>>;

fn empty_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

/// String-keyed hash map over a power-of-two-multiple bucket array.
///
/// `set` grows the map before inserting whenever `len / capacity` has
/// reached the load factor, so the check uses the pre-insertion size.
/// Growth doubles the capacity and rehashes every entry into a fresh
/// bucket array. Removals and `clear` never shrink it.
#[derive(Clone)]
pub struct BucketMap<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
    initial_capacity: usize,
    load_factor: f64,
}

impl<V> BucketMap<V> {
    /// Empty map with 16 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        let config = Config::default();
        Self::from_valid(config)
    }

    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_config(Config::new(initial_capacity, load_factor))
    }

    fn from_valid(config: Config) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            initial_capacity: config.initial_capacity,
            load_factor: config.load_factor,
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    fn index_of(&self, key: &str) -> usize {
        bucket_index(key, self.capacity())
    }

    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets[self.index_of(key)].as_ref()
    }

    /// Inserts or updates `key`. Returns the previous value on update.
    ///
    /// Only string-like keys are accepted; anything else is rejected at
    /// compile time:
    ///
    /// ```compile_fail
    /// let mut m = bucket_map::BucketMap::new();
    /// m.set(42, "x");
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.upsert(key.into(), value)
    }

    /// Load check, then upsert. Growth reinserts through here as well, so a
    /// rehash can cross the threshold of the new array and grow again.
    fn upsert(&mut self, key: String, value: V) -> Option<V> {
        if self.at_load_limit() {
            self.grow();
        }
        let idx = self.index_of(&key);
        let prev = self.insert_at(idx, key, value);
        self.debug_check_bucket(idx);
        prev
    }

    fn at_load_limit(&self) -> bool {
        self.len as f64 / self.capacity() as f64 >= self.load_factor
    }

    /// Upserts into bucket `idx`, materializing its chain on first use.
    fn insert_at(&mut self, idx: usize, key: String, value: V) -> Option<V> {
        let prev = self.buckets[idx]
            .get_or_insert_with(Chain::new)
            .upsert(key, value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// Doubles the capacity and rehashes every entry, in bucket-then-chain
    /// order, into a brand-new bucket array via `upsert`.
    ///
    /// The old array is taken out before any entry moves. If a reinsert
    /// grows again, that nested growth rehashes the partially filled new
    /// array, and the rest of the old array then lands in the newest one.
    fn grow(&mut self) {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .expect("BucketMap capacity overflow");
        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.len = 0;
        for chain in old.into_iter().flatten() {
            for Entry { key, value } in chain {
                let _ = self.upsert(key, value);
            }
        }
        self.debug_check_all();
    }

    /// Value for `key`, or `None` when absent. A stored value is always
    /// `Some`, so absence is never confused with a particular value.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.index_of(key);
        self.buckets[idx].as_mut()?.get_mut(key)
    }

    /// Whether `key` is present, found by a key scan independent of values.
    pub fn has(&self, key: &str) -> bool {
        self.chain(key).map(|c| c.contains(key)).unwrap_or(false)
    }

    /// Removes `key` and returns its value. The bucket is reset to empty
    /// when its chain runs dry.
    pub fn take(&mut self, key: &str) -> Option<V> {
        let idx = self.index_of(key);
        let slot = &mut self.buckets[idx];
        let chain = slot.as_mut()?;
        let value = chain.remove(key)?;
        if chain.is_empty() {
            *slot = None;
        }
        self.len -= 1;
        self.debug_check_bucket(idx);
        Some(value)
    }

    /// Removes `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Drops every entry; capacity and load factor stay as they are.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.capacity());
        self.len = 0;
        self.debug_check_all();
    }

    /// Snapshot of all keys in bucket-then-chain order.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: None,
            remaining: self.len,
        }
    }

    #[inline]
    fn debug_check_bucket(&self, _idx: usize) {
        #[cfg(debug_assertions)]
        self.check_bucket(_idx);
    }

    #[inline]
    fn debug_check_all(&self) {
        #[cfg(debug_assertions)]
        {
            let cap = self.capacity();
            assert!(
                cap % self.initial_capacity == 0 && (cap / self.initial_capacity).is_power_of_two(),
                "capacity {cap} is not a doubling of {}",
                self.initial_capacity
            );
            let mut total = 0;
            for idx in 0..cap {
                self.check_bucket(idx);
                total += self.buckets[idx].as_ref().map(Chain::len).unwrap_or(0);
            }
            assert_eq!(total, self.len, "len out of sync with chains");
        }
    }

    #[cfg(debug_assertions)]
    fn check_bucket(&self, idx: usize) {
        let Some(chain) = &self.buckets[idx] else {
            return;
        };
        assert!(!chain.is_empty(), "empty chain retained at bucket {idx}");
        let entries = chain.entries();
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(self.index_of(&e.key), idx, "key {:?} in wrong bucket", e.key);
            assert!(
                entries[i + 1..].iter().all(|o| o.key != e.key),
                "duplicate key {:?} in bucket {idx}",
                e.key
            );
        }
    }
}

impl<V: Clone> BucketMap<V> {
    /// Snapshot of all values in bucket-then-chain order.
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of all pairs in bucket-then-chain order.
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

impl<V> Default for BucketMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for BucketMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for BucketMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            let _ = self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for BucketMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

/// Iterator over `(&str, &V)` in bucket-then-chain order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    chain: Option<core::slice::Iter<'a, Entry<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((e.key.as_str(), &e.value));
            }
            self.chain = self.buckets.next()?.as_ref().map(|c| c.entries().iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over `(&str, &mut V)` in bucket-then-chain order.
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Bucket<V>>,
    chain: Option<core::slice::IterMut<'a, Entry<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((e.key.as_str(), &mut e.value));
            }
            self.chain = self
                .buckets
                .next()?
                .as_mut()
                .map(|c| c.entries_mut().iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<'a, V> IntoIterator for &'a BucketMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut BucketMap<V> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
