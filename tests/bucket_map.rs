// BucketMap integration suite.
//
// Each test documents the behavior being verified. Core invariants:
// - Round-trip: a set key reads back its value and reports present.
// - Upsert: setting an existing key replaces its value without growing len.
// - Removal: a removed key is absent; removing an absent key is a no-op.
// - Growth: capacity only doubles, never shrinks, and keeps every entry.
// - Clear: empties the map and keeps capacity.
use bucket_map::{BucketMap, Config, ConfigError, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
use std::collections::BTreeSet;

// Test: defaults.
// Verifies: 16 buckets, load factor 0.75, empty.
#[test]
fn defaults() {
    let m: BucketMap<u8> = BucketMap::new();
    assert_eq!(m.capacity(), DEFAULT_INITIAL_CAPACITY);
    assert_eq!(m.initial_capacity(), 16);
    assert_eq!(m.load_factor(), DEFAULT_LOAD_FACTOR);
    assert_eq!(m.len(), 0);
    assert!(m.is_empty());
    assert!(m.keys().is_empty());
}

// Test: round trip.
// Verifies: get returns the stored value and has reports presence.
#[test]
fn set_get_has_round_trip() {
    let mut m = BucketMap::new();
    for (k, v) in [("alpha", 1), ("beta", 2), ("", 3), ("日本", 4)] {
        assert_eq!(m.set(k, v), None);
        assert_eq!(m.get(k), Some(&v));
        assert!(m.has(k));
    }
    assert_eq!(m.len(), 4);
}

// Test: update does not duplicate.
// Verifies: len stays 1 and the second value wins.
#[test]
fn update_not_duplicate() {
    let mut m = BucketMap::new();
    m.set("k".to_string(), "v1");
    assert_eq!(m.set("k", "v2"), Some("v1"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(&"v2"));
    assert_eq!(m.keys(), ["k"]);
}

// Test: deletion.
// Verifies: remove reports success once, len drops by exactly one, and a
// second remove returns false without changing len.
#[test]
fn deletion() {
    let mut m = BucketMap::new();
    m.set("keep", 1);
    m.set("drop", 2);
    assert_eq!(m.len(), 2);
    assert!(m.remove("drop"));
    assert!(!m.has("drop"));
    assert_eq!(m.get("drop"), None);
    assert_eq!(m.len(), 1);
    assert!(!m.remove("drop"));
    assert!(!m.remove("never-there"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("keep"), Some(&1));
}

// Test: take returns ownership of the removed value.
#[test]
fn take_returns_value() {
    let mut m = BucketMap::new();
    m.set("k", vec![1, 2, 3]);
    assert_eq!(m.take("k"), Some(vec![1, 2, 3]));
    assert_eq!(m.take("k"), None);
    assert!(m.is_empty());
}

// Test: stored "empty" values stay distinguishable from absence.
// Verifies: has() is a key scan; get() wraps stored values in Some.
#[test]
fn stored_none_is_not_absence() {
    let mut m: BucketMap<Option<i32>> = BucketMap::new();
    m.set("nothing", None);
    assert!(m.has("nothing"));
    assert_eq!(m.get("nothing"), Some(&None));
    assert!(!m.has("missing"));
    assert_eq!(m.get("missing"), None);
}

// Test: resize correctness with 100 keys from 16 buckets at 0.75.
// Verifies: every pair survives multiple doublings and len == 100.
#[test]
fn resize_preserves_entries() {
    let mut m = BucketMap::with_capacity_and_load_factor(16, 0.75).unwrap();
    let mut caps = vec![m.capacity()];
    for i in 0..100 {
        m.set(format!("key-{i}"), i);
        if *caps.last().unwrap() != m.capacity() {
            caps.push(m.capacity());
        }
    }
    assert_eq!(m.len(), 100);
    assert_eq!(caps, [16, 32, 64, 128, 256]);
    for i in 0..100 {
        assert_eq!(m.get(&format!("key-{i}")), Some(&i));
    }
}

// Test: capacity growth law.
// Verifies: capacity is the initial value times a power of two and does not
// decrease after removals or clear.
#[test]
fn capacity_never_shrinks() {
    let mut m = BucketMap::with_capacity_and_load_factor(3, 0.5).unwrap();
    let mut last = m.capacity();
    for i in 0..50 {
        m.set(i.to_string(), i);
        let cap = m.capacity();
        assert!(cap == last || cap == last * 2);
        assert_eq!(cap % 3, 0);
        assert!((cap / 3).is_power_of_two());
        last = cap;
    }
    for i in 0..50 {
        assert!(m.remove(&i.to_string()));
        assert_eq!(m.capacity(), last);
    }
    m.clear();
    assert_eq!(m.capacity(), last);
}

// Test: clear.
// Verifies: len 0, all previous keys absent, capacity unchanged, and the map
// is usable afterwards.
#[test]
fn clear_empties_and_keeps_capacity() {
    let mut m = BucketMap::new();
    for i in 0..40 {
        m.set(format!("k{i}"), i);
    }
    let cap = m.capacity();
    m.clear();
    assert_eq!(m.len(), 0);
    assert!(m.is_empty());
    assert_eq!(m.capacity(), cap);
    for i in 0..40 {
        assert_eq!(m.get(&format!("k{i}")), None);
        assert!(!m.has(&format!("k{i}")));
    }
    assert!(m.keys().is_empty());
    assert!(m.values().is_empty());
    assert!(m.entries().is_empty());
    m.set("again", 1);
    assert_eq!(m.get("again"), Some(&1));
}

// Test: capacity 4 at 0.75 with "a", "b", "c".
// Verifies: growth waits for the next set after load reaches 3/4; keys are a
// permutation of the inserted ones; missing keys read as None.
#[test]
fn small_map_scenario() {
    let mut m = BucketMap::with_capacity_and_load_factor(4, 0.75).unwrap();
    m.set("a", 1);
    m.set("b", 2);
    m.set("c", 3);
    assert_eq!(m.len(), 3);
    assert_eq!(m.capacity(), 4);

    let keys: BTreeSet<String> = m.keys().into_iter().collect();
    let expected: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys, expected);
    assert_eq!(m.get("z"), None);

    // The load is now 3/4, so the next set doubles first.
    m.set("d", 4);
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.len(), 4);
}

// Test: snapshot helpers agree with each other and with len.
#[test]
fn keys_values_entries_agree() {
    let m: BucketMap<usize> = (0..30).map(|i| (format!("n{i}"), i)).collect();
    let entries = m.entries();
    assert_eq!(entries.len(), m.len());
    let keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();
    let values: Vec<usize> = entries.iter().map(|(_, v)| *v).collect();
    assert_eq!(m.keys(), keys);
    assert_eq!(m.values(), values);
    for (k, v) in &m {
        assert_eq!(k, format!("n{v}"));
    }
}

// Test: Extend routes through set, so duplicates update in place.
#[test]
fn extend_upserts() {
    let mut m = BucketMap::new();
    m.extend([("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("a"), Some(&3));
}

// Test: construction rejects invalid parameters instead of panicking.
#[test]
fn invalid_construction() {
    assert_eq!(
        BucketMap::<()>::with_capacity_and_load_factor(0, 0.5).err(),
        Some(ConfigError::ZeroCapacity)
    );
    assert_eq!(
        BucketMap::<()>::with_config(Config::new(8, 0.0)).err(),
        Some(ConfigError::LoadFactorOutOfRange(0.0))
    );
    let m = BucketMap::<()>::with_config(Config::default().with_initial_capacity(1).with_load_factor(1.0))
        .unwrap();
    assert_eq!(m.capacity(), 1);
    assert_eq!(m.load_factor(), 1.0);
}
