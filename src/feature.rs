use rayon::prelude::*;
use std::fmt;

/// Above this many features the sort runs on the rayon pool.
const PARALLEL_SORT_THRESHOLD: usize = 10_000;

/// Discrete feature type code, only used to look up a display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(String);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeId {
    fn from(code: &str) -> Self {
        Self(code.trim().to_string())
    }
}

impl From<u32> for TypeId {
    fn from(code: u32) -> Self {
        Self(code.to_string())
    }
}

impl From<i32> for TypeId {
    fn from(code: i32) -> Self {
        Self(code.to_string())
    }
}

/// A labeled half-open interval `[start, end)` over a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub type_id: TypeId,
}

impl Feature {
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        type_id: impl Into<TypeId>,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            type_id: type_id.into(),
        }
    }

    /// Whether `[start, end)` is a well-formed interval inside a sequence of `seq_len`.
    pub fn fits(&self, seq_len: usize) -> bool {
        self.start <= self.end && self.end <= seq_len
    }
}

/// How features with equal starts are ordered relative to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Start ascending, ties keep input order.
    Start,
    /// Start ascending, then end ascending, then input order.
    #[default]
    StartThenEnd,
}

/// Sort features ascending by start. Both orders are stable, so features that
/// compare equal keep their input order and the earlier-declared one wins the
/// greedy acceptance.
pub fn sort_features(features: &mut [Feature], order: SortOrder) {
    let parallel = features.len() >= PARALLEL_SORT_THRESHOLD;
    match (order, parallel) {
        (SortOrder::Start, false) => features.sort_by_key(|f| f.start),
        (SortOrder::Start, true) => features.par_sort_by_key(|f| f.start),
        (SortOrder::StartThenEnd, false) => features.sort_by_key(|f| (f.start, f.end)),
        (SortOrder::StartThenEnd, true) => features.par_sort_by_key(|f| (f.start, f.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_features(rng: &mut StdRng, n: usize) -> Vec<Feature> {
        (0..n)
            .map(|i| {
                let start = rng.gen_range(0..50);
                let end = start + rng.gen_range(0..10);
                Feature::new(start, end, format!("f{i}"), rng.gen_range(0..10u32))
            })
            .collect()
    }

    #[test]
    fn test_sort_by_start() {
        let mut features = vec![
            Feature::new(5, 8, "B", 2),
            Feature::new(0, 5, "A", 1),
            Feature::new(3, 4, "C", 3),
        ];
        sort_features(&mut features, SortOrder::Start);
        let labels: Vec<&str> = features.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut features = vec![
            Feature::new(2, 9, "long", 1),
            Feature::new(2, 3, "short", 1),
            Feature::new(2, 9, "long-again", 1),
        ];
        sort_features(&mut features, SortOrder::Start);
        let labels: Vec<&str> = features.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["long", "short", "long-again"]);
    }

    #[test]
    fn test_ties_broken_by_end() {
        let mut features = vec![
            Feature::new(2, 9, "long", 1),
            Feature::new(2, 3, "short", 1),
            Feature::new(2, 9, "long-again", 1),
        ];
        sort_features(&mut features, SortOrder::StartThenEnd);
        let labels: Vec<&str> = features.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["short", "long", "long-again"]);
    }

    #[test]
    fn test_sort_keeps_every_feature() {
        let mut rng = StdRng::seed_from_u64(7);
        for order in [SortOrder::Start, SortOrder::StartThenEnd] {
            let original = random_features(&mut rng, 200);
            let mut sorted = original.clone();
            sort_features(&mut sorted, order);

            assert_eq!(sorted.len(), original.len());
            assert!(sorted.windows(2).all(|w| w[0].start <= w[1].start));
            let mut a: Vec<&str> = original.iter().map(|f| f.label.as_str()).collect();
            let mut b: Vec<&str> = sorted.iter().map(|f| f.label.as_str()).collect();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parallel_sort_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = random_features(&mut rng, PARALLEL_SORT_THRESHOLD + 1);

        let mut parallel = original.clone();
        sort_features(&mut parallel, SortOrder::StartThenEnd);
        let mut sequential = original;
        sequential.sort_by_key(|f| (f.start, f.end));
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_type_id_from_number_and_str() {
        assert_eq!(TypeId::from(3), TypeId::from(" 3 "));
        assert_eq!(TypeId::from("promoter").to_string(), "promoter");
    }

    #[test]
    fn test_fits() {
        assert!(Feature::new(0, 10, "A", 1).fits(10));
        assert!(Feature::new(4, 4, "A", 1).fits(10));
        assert!(!Feature::new(5, 11, "A", 1).fits(10));
        assert!(!Feature::new(6, 2, "A", 1).fits(10));
    }
}
