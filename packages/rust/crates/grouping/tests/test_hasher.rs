//! Tests for hasher module - FNV-1a golden values and distribution.

use std::collections::HashMap;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grouping::{Fnv1a, SeedHasher, bucket_of, fnv1a_32};

#[test]
fn test_letters() {
    assert_eq!(fnv1a_32("abcde"), 1_956_368_136);
}

#[test]
fn test_digits() {
    assert_eq!(fnv1a_32("12345"), 1_136_836_824);
}

#[test]
fn test_symbols() {
    assert_eq!(fnv1a_32("++--//"), 3_244_193_459);
}

#[test]
fn test_emoji() {
    assert_eq!(fnv1a_32("🎧"), 1_524_062_823);
}

#[test]
fn test_mixed() {
    assert_eq!(fnv1a_32("12345abcde++--//🎧"), 876_805_499);
}

#[test]
fn test_default_hasher_through_trait_object() {
    let hasher: &dyn SeedHasher = &Fnv1a;
    assert_eq!(hasher.hash("abcde"), 1_956_368_136);
}

#[test]
fn test_buckets_roughly_uniform() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let samples = 100_000;
    let mut counts: HashMap<u32, u32> = HashMap::new();

    for _ in 0..samples {
        let seed: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        if let Ok(bucket) = bucket_of(fnv1a_32(&seed)) {
            *counts.entry(bucket).or_default() += 1;
        }
    }

    assert_eq!(counts.len(), 100);
    let expected = f64::from(samples) / 100.0;
    for (bucket, count) in counts {
        let deviation = (f64::from(count) - expected).abs() / expected;
        assert!(
            deviation < 0.2,
            "bucket {bucket} has {count} seeds, expected ~{expected} (deviation {deviation:.2})"
        );
    }
}
