//! Correctness and invariant tests for linestats
//!
//! These tests verify critical invariants, merge semantics, and edge cases
//! across all estimator families. They complement the unit tests in each module
//! by focusing on properties that must always hold.

use linestats::frequency::KeywordCounter;
use linestats::membership::DuplicateTracker;
use linestats::quantiles::{BoundedHistogram, MedianEstimator};
use linestats::statistics::{RunningStats, VarianceAccumulator};
use linestats::traits::Sketch;
use linestats::{OutOfRange, QueryError};

fn reference_median(values: &[usize]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

fn reference_stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1.0)).sqrt()
}

// ============================================================================
// Bounded Histogram
// ============================================================================

mod histogram {
    use super::*;

    #[test]
    fn median_matches_sorted_reference() {
        let cases: [&[usize]; 7] = [
            &[1],
            &[1, 2],
            &[2, 2, 2],
            &[5, 3, 9, 1],
            &[0, 0, 0, 3999],
            &[10, 20, 20, 20, 30, 40],
            &[7, 7, 8, 8, 9, 100, 100, 3],
        ];

        for values in cases {
            let mut hist = BoundedHistogram::new(4000);
            for &v in values {
                hist.observe(v).unwrap();
            }
            assert_eq!(
                hist.median(),
                Ok(reference_median(values)),
                "values {values:?}"
            );
        }
    }

    #[test]
    fn median_independent_of_insertion_order() {
        let values: Vec<usize> = (0..501).map(|i| (i * 37) % 211).collect();
        let mut forward = BoundedHistogram::new(4000);
        let mut backward = BoundedHistogram::new(4000);

        for &v in &values {
            forward.observe(v).unwrap();
        }
        for &v in values.iter().rev() {
            backward.observe(v).unwrap();
        }

        assert_eq!(forward, backward);
        assert_eq!(forward.median(), Ok(reference_median(&values)));
    }

    #[test]
    fn rejected_values_do_not_corrupt_state() {
        let mut hist = BoundedHistogram::new(4000);
        let mut accepted = Vec::new();

        for v in [12, 4000, 7, 9001, 7, 3999, usize::MAX, 1] {
            match hist.observe(v) {
                Ok(()) => accepted.push(v),
                Err(OutOfRange { value, bound }) => {
                    assert_eq!(value, v);
                    assert_eq!(bound, 4000);
                }
            }
        }

        assert_eq!(accepted, [12, 7, 7, 3999, 1]);
        assert_eq!(hist.len(), accepted.len() as u64);
        assert_eq!(hist.median(), Ok(reference_median(&accepted)));
    }

    #[test]
    fn bound_value_fails_and_leaves_size_unchanged() {
        let mut hist = BoundedHistogram::new(4000);
        assert!(hist.observe(4000).is_err());
        assert_eq!(hist.len(), 0);
        assert_eq!(hist.median(), Err(QueryError::Empty));
    }

    #[test]
    fn median_of_last_bucket() {
        let mut hist = BoundedHistogram::new(4000);
        hist.observe(3999).unwrap();
        hist.observe(3999).unwrap();
        assert_eq!(hist.median(), Ok(3999.0));
    }

    #[test]
    fn merge_equivalent_to_sequential_observe() {
        let data_a = [4, 8, 15, 16];
        let data_b = [23, 42, 4, 8, 8];

        let mut sequential = BoundedHistogram::new(100);
        for &v in data_a.iter().chain(data_b.iter()) {
            sequential.observe(v).unwrap();
        }

        let mut ha = BoundedHistogram::new(100);
        let mut hb = BoundedHistogram::new(100);
        for &v in &data_a {
            ha.observe(v).unwrap();
        }
        for &v in &data_b {
            hb.observe(v).unwrap();
        }
        ha.merge(&hb).unwrap();

        assert_eq!(ha, sequential);
        assert_eq!(ha.median(), sequential.median());
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut hist = BoundedHistogram::new(50);
        for v in [1, 2, 3] {
            hist.observe(v).unwrap();
        }
        let before = hist.clone();

        hist.merge(&BoundedHistogram::new(50)).unwrap();
        assert_eq!(hist, before);
    }

    #[test]
    fn shared_estimator_counts_every_thread() {
        let est = MedianEstimator::with_bound(4000);
        std::thread::scope(|s| {
            for t in 0..8usize {
                let est = &est;
                s.spawn(move || {
                    for i in 0..1000 {
                        // Every tenth value is out of range
                        let v = if i % 10 == 0 { 4000 + t } else { i };
                        let _ = est.observe(v);
                    }
                });
            }
        });

        assert_eq!(est.count(), 8 * 900);
    }
}

// ============================================================================
// Running Stats
// ============================================================================

mod running_stats {
    use super::*;

    #[test]
    fn stddev_matches_two_pass_reference() {
        let values: Vec<f64> = (0..1000).map(|i| ((i * 7919) % 997) as f64).collect();
        let mut stats = RunningStats::new();
        for &v in &values {
            stats.add(v);
        }

        let expected = reference_stddev(&values);
        let got = stats.sample_stddev().unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "stddev: {got} vs {expected}"
        );
    }

    #[test]
    fn fewer_than_two_values_is_insufficient() {
        let mut stats = RunningStats::new();
        assert!(matches!(
            stats.sample_stddev(),
            Err(QueryError::InsufficientData { found: 0, .. })
        ));
        stats.add(1.0);
        assert!(matches!(
            stats.sample_stddev(),
            Err(QueryError::InsufficientData { found: 1, .. })
        ));
        stats.add(3.0);
        assert!((stats.sample_stddev().unwrap() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn merge_is_associative() {
        let mut a = RunningStats::new();
        let mut b = RunningStats::new();
        let mut c = RunningStats::new();

        for v in [1.0, 2.0, 3.0] {
            a.add(v);
        }
        for v in [4.0, 5.0, 6.0] {
            b.add(v);
        }
        for v in [7.0, 8.0, 9.0] {
            c.add(v);
        }

        let mut ab_c = a.clone();
        ab_c.merge(&b).unwrap();
        ab_c.merge(&c).unwrap();

        let mut bc = b.clone();
        bc.merge(&c).unwrap();
        let mut a_bc = a.clone();
        a_bc.merge(&bc).unwrap();

        assert_eq!(ab_c.len(), a_bc.len());
        assert!((ab_c.mean().unwrap() - a_bc.mean().unwrap()).abs() < 1e-10);
        assert!(
            (ab_c.sample_variance().unwrap() - a_bc.sample_variance().unwrap()).abs() < 1e-10
        );
    }

    #[test]
    fn merge_equivalent_to_sequential_add() {
        let data_a = [1.5, 3.7, 2.1, 8.9, 4.3];
        let data_b = [6.2, 7.4, 0.5, 9.1, 5.6];

        let mut sequential = RunningStats::new();
        for &v in data_a.iter().chain(data_b.iter()) {
            sequential.add(v);
        }

        let mut sa = RunningStats::new();
        let mut sb = RunningStats::new();
        for &v in &data_a {
            sa.add(v);
        }
        for &v in &data_b {
            sb.add(v);
        }
        sa.merge(&sb).unwrap();

        assert_eq!(sa.len(), sequential.len());
        assert!((sa.mean().unwrap() - sequential.mean().unwrap()).abs() < 1e-10);
        assert!(
            (sa.sample_variance().unwrap() - sequential.sample_variance().unwrap()).abs() < 1e-10
        );
        assert_eq!(sa.min(), sequential.min());
        assert_eq!(sa.max(), sequential.max());
    }

    #[test]
    fn shared_accumulator_matches_sequential() {
        let acc = VarianceAccumulator::default();
        std::thread::scope(|s| {
            for t in 0..4i32 {
                let acc = &acc;
                s.spawn(move || {
                    let values: Vec<f64> = (0..250i32).map(|i| f64::from(t * 250 + i)).collect();
                    acc.observe_many(values);
                });
            }
        });

        let all: Vec<f64> = (0..1000i32).map(f64::from).collect();
        assert_eq!(acc.count(), 1000);
        assert!((acc.stddev().unwrap() - reference_stddev(&all)).abs() < 1e-9);
    }

    #[test]
    fn clear_resets_completely() {
        let mut stats = RunningStats::new();
        for v in [1.0, 2.0, 3.0] {
            stats.add(v);
        }

        stats.clear();

        assert!(stats.is_empty());
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
    }
}

// ============================================================================
// Duplicate Tracker
// ============================================================================

mod duplicates {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn count_is_total_minus_distinct() {
        let lines: Vec<String> = (0..2000).map(|i| format!("line {}", (i * 31) % 357)).collect();
        let tracker = DuplicateTracker::new();

        std::thread::scope(|s| {
            for chunk in lines.chunks(250) {
                let tracker = &tracker;
                s.spawn(move || {
                    for line in chunk {
                        tracker.observe(line.as_str());
                    }
                });
            }
        });

        let distinct: HashSet<&String> = lines.iter().collect();
        assert_eq!(tracker.distinct_count(), distinct.len() as u64);
        assert_eq!(
            tracker.duplicate_count(),
            lines.len() as u64 - distinct.len() as u64
        );
    }

    #[test]
    fn racing_first_occurrences_counted_once() {
        for _ in 0..20 {
            let tracker = DuplicateTracker::new();
            std::thread::scope(|s| {
                for _ in 0..8 {
                    s.spawn(|| tracker.observe("same line"));
                }
            });
            assert_eq!(tracker.duplicate_count(), 7);
            assert_eq!(tracker.distinct_count(), 1);
        }
    }
}

// ============================================================================
// Keyword Counter
// ============================================================================

mod keywords {
    use super::*;

    #[test]
    fn unknown_tokens_never_create_keys() {
        let counter = KeywordCounter::from_keywords(["go", "rust"]);
        for token in ["python", "Java", "GO", "gopher", "go!", "Rust"] {
            counter.observe(token);
        }

        assert_eq!(counter.len(), 2);
        assert_eq!(counter.count("go"), Some(1));
        assert_eq!(counter.count("rust"), Some(1));
        assert_eq!(counter.count("python"), None);
        assert_eq!(counter.count("gopher"), None);
    }

    #[test]
    fn absent_keywords_stay_zero() {
        let counter = KeywordCounter::from_keywords(["alpha", "beta"]);
        for _ in 0..100 {
            counter.observe("alpha");
        }
        assert_eq!(
            counter.snapshot(),
            vec![("alpha".to_string(), 100), ("beta".to_string(), 0)]
        );
    }

    #[test]
    fn empty_vocabulary_counts_nothing() {
        let counter = KeywordCounter::default();
        assert!(!counter.observe("anything"));
        assert!(counter.is_empty());
        assert!(counter.snapshot().is_empty());
    }
}
