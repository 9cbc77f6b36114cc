//! Integration tests for sharing WeightBalancedMap across threads.
//!
//! With the `arc` feature enabled, nodes are reference counted with `Arc`, so
//! versions of a map can be read and extended from several threads at once.

#![cfg(feature = "arc")]

use rstest::rstest;
use std::sync::Arc;
use std::thread;
use wbtree::persistent::WeightBalancedMap;

#[rstest]
fn test_map_cross_thread_structural_sharing() {
    let original: Arc<WeightBalancedMap<i32, String>> = Arc::new(
        (0..100)
            .map(|key| (key, format!("value_{key}")))
            .collect(),
    );

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let map_clone = Arc::clone(&original);
            thread::spawn(move || {
                let extended = map_clone.insert(1_000 + index, format!("thread_{index}"));
                assert_eq!(extended.len(), 101);
                assert_eq!(map_clone.len(), 100);
                assert!(extended.is_well_formed());
                extended
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (index, map) in (0..).zip(results.iter()) {
        assert_eq!(map.get(&(1_000 + index)), Some(&format!("thread_{index}")));
        assert_eq!(map.get(&50), Some(&"value_50".to_string()));
    }
    assert_eq!(original.len(), 100);
    assert!(!original.contains_key(&1_000));
}

#[rstest]
fn test_map_sent_by_value_between_threads() {
    let map = WeightBalancedMap::from_pairs((0..64).map(|key| (key, key * 2)));
    let kept = map.clone();

    let handle = thread::spawn(move || {
        (0..32).fold(map, |map, key| map.remove(&(key * 2)))
    });
    let thinned = handle.join().expect("Thread panicked");

    assert_eq!(thinned.len(), 32);
    assert!(thinned.is_well_formed());
    assert_eq!(kept.len(), 64);
    assert_eq!(kept.get(&0), Some(&0));
}

#[rstest]
fn test_concurrent_readers_see_same_contents() {
    let map = Arc::new(WeightBalancedMap::from_pairs((0..1_000).map(|key| (key, key))));

    let sums: Vec<i64> = (0..8)
        .map(|_| {
            let reader = Arc::clone(&map);
            thread::spawn(move || reader.values().map(|value| i64::from(*value)).sum::<i64>())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    assert!(sums.iter().all(|sum| *sum == 499_500));
}
