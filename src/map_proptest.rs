#![cfg(test)]

// Property tests for BucketMap kept inside the crate so they can look at
// capacity history alongside the model comparison.

use crate::map::BucketMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Has(String),
    Remove(usize),
    Take(usize),
    Mutate(usize, i32),
    Clear,
    Snapshot,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![has_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::Has),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Take),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Snapshot),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model(
    mut sut: BucketMap<i32>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let initial = sut.capacity();
    let mut last_capacity = initial;

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let prev = sut.set(k.as_str(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Has(s) => {
                prop_assert_eq!(sut.has(&s), model.contains_key(&s));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                let expected_len = if removed { before - 1 } else { before };
                prop_assert_eq!(sut.len(), expected_len);
                prop_assert!(!sut.has(k));
                prop_assert_eq!(sut.get(k), None);
            }
            OpI::Take(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.take(k), model.remove(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(vr) = sut.get_mut(k) {
                    *vr = vr.wrapping_add(d);
                    let mv = model.get_mut(k).expect("model has key present in sut");
                    *mv = mv.wrapping_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
            }
            OpI::Snapshot => {
                let entries: BTreeMap<String, i32> = sut.entries().into_iter().collect();
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(entries.len(), sut.len());
                prop_assert_eq!(entries, expected);
                prop_assert_eq!(sut.keys().len(), sut.len());
                prop_assert_eq!(sut.values().len(), sut.len());
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Capacity only ever doubles from its initial value; a single op
        //    may double it several times when a rehash grows again
        let cap = sut.capacity();
        prop_assert!(cap >= last_capacity);
        prop_assert!((cap / last_capacity).is_power_of_two());
        prop_assert_eq!(cap % last_capacity, 0);
        prop_assert_eq!(cap % initial, 0);
        prop_assert!((cap / initial).is_power_of_two());
        last_capacity = cap;
        // 3) Traversal yields exactly `len` entries
        prop_assert_eq!(sut.iter().count(), sut.len());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` returns the replaced value exactly when the key was present.
// - `get`/`has` parity with the model; `remove`/`take` report presence.
// - `len` tracks distinct keys; `clear` keeps capacity.
// - Capacity moves only by doubling, never down.
// - Snapshots contain exactly the model's entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(BucketMap::new(), &pool, ops)?;
    }
}

// Property: same state machine starting from tiny capacities and assorted
// load factors, which forces long chains and repeated growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_small_tables(
        (pool, ops) in arb_scenario(),
        cap in 1usize..=4,
        lf in prop_oneof![Just(1.0f64), Just(0.75), Just(0.5), Just(0.1)],
    ) {
        let sut = BucketMap::with_capacity_and_load_factor(cap, lf).expect("valid config");
        run_against_model(sut, &pool, ops)?;
    }
}

// Property: every inserted pair survives any number of resizes.
proptest! {
    #[test]
    fn prop_values_survive_growth(keys in proptest::collection::btree_set("[a-zA-Z0-9]{1,8}", 1..300)) {
        let mut m = BucketMap::with_capacity_and_load_factor(2, 0.75).expect("valid config");
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.set(k.as_str(), i), None);
        }
        prop_assert_eq!(m.len(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&i));
            prop_assert!(m.has(k));
        }
    }
}
