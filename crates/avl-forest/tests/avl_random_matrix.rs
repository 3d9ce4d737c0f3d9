use std::collections::BTreeMap;

use avl_forest::AvlMap;
use avl_forest_util::Fuzzer;

/// Mixed random insertions and deletions mirrored against `BTreeMap`,
/// with the full structural audit after every single operation.
fn run_mirror(seed: u64, ops: usize, key_space: i64) {
    let fuzzer = Fuzzer::new(Some(seed));
    let mut map = AvlMap::<i64, i64>::new();
    let mut mirror = BTreeMap::new();

    for step in 0..ops {
        let key = fuzzer.random_int(0, key_space - 1);
        if fuzzer.chance(0.6) {
            let value = fuzzer.random_int(i64::MIN / 2, i64::MAX / 2);
            map.insert(key, value);
            mirror.insert(key, value);
        } else {
            assert_eq!(
                map.remove(&key),
                mirror.remove(&key).is_some(),
                "seed {seed} step {step}: removal disagreed on key {key}"
            );
        }

        if let Err(err) = map.assert_valid() {
            panic!("seed {seed} step {step}: {err}");
        }
        assert_eq!(map.len(), mirror.len(), "seed {seed} step {step}");
    }

    let ours: Vec<(i64, i64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let theirs: Vec<(i64, i64)> = mirror.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(ours, theirs, "seed {seed}: final in-order mismatch");
}

#[test]
fn random_mirror_small_keyspace() {
    // Tight key space: plenty of overwrites and repeated delete/insert of
    // the same keys.
    run_mirror(0xA11CE, 2000, 48);
}

#[test]
fn random_mirror_wide_keyspace() {
    run_mirror(0xB0B, 3000, 4096);
}

#[test]
fn random_mirror_delete_heavy() {
    let fuzzer = Fuzzer::new(Some(7));
    let mut map = AvlMap::<i64, i64>::new();
    let mut mirror = BTreeMap::new();

    for i in 0..512 {
        map.insert(i, i);
        mirror.insert(i, i);
    }

    // Drain in random order, validating the whole way down.
    while !mirror.is_empty() {
        let keys: Vec<i64> = mirror.keys().copied().collect();
        let key = *fuzzer.pick(&keys);
        assert!(map.remove(&key));
        mirror.remove(&key);
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(map.first(), None);
}
