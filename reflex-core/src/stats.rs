//! Leaderboard and distribution statistics over a dataset snapshot.
//!
//! Every function here is pure: it reads the dataset it is given and keeps no
//! state between calls.

use crate::record::{PlayerDataset, PlayerRecord};

pub const BUCKET_COUNT: usize = 10;

/// Histogram edges in milliseconds. Bucket `i` covers `[BOUNDS[i], BOUNDS[i + 1])`.
///
/// Times of 380 ms and above land in no bucket at all. There is no overflow bar.
pub const BUCKET_BOUNDS_MS: [u32; BUCKET_COUNT + 1] =
    [0, 200, 220, 240, 260, 280, 300, 320, 340, 360, 380];

/// One bar of the reaction-time histogram. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    pub lower_bound_ms: u32,
    pub upper_bound_ms: u32,
    pub count: u32,
}

impl HistogramBucket {
    /// Axis label, e.g. `"200-219"`. The last bucket reads `"360-380"`.
    pub fn label(&self) -> String {
        if self.upper_bound_ms == BUCKET_BOUNDS_MS[BUCKET_COUNT] {
            format!("{}-{}", self.lower_bound_ms, self.upper_bound_ms)
        } else {
            format!("{}-{}", self.lower_bound_ms, self.upper_bound_ms - 1)
        }
    }
}

/// The `n` fastest records, fastest first. Equal times keep insertion order.
pub fn top_n(dataset: &PlayerDataset, n: usize) -> Vec<&PlayerRecord> {
    let mut sorted: Vec<&PlayerRecord> = dataset.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|r| r.reaction_time_ms());
    sorted.truncate(n);
    sorted
}

/// Arithmetic mean of all reaction times, `0.0` for an empty dataset.
pub fn mean(dataset: &PlayerDataset) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let total: u64 = dataset.iter().map(|r| u64::from(r.reaction_time_ms())).sum();
    total as f64 / dataset.len() as f64
}

/// Fastest reaction time, `0` for an empty dataset.
pub fn best(dataset: &PlayerDataset) -> u32 {
    dataset
        .iter()
        .map(PlayerRecord::reaction_time_ms)
        .min()
        .unwrap_or(0)
}

/// Index of the bucket holding `time_ms`, if any.
pub fn bucket_index(time_ms: u32) -> Option<usize> {
    BUCKET_BOUNDS_MS
        .windows(2)
        .position(|edge| edge[0] <= time_ms && time_ms < edge[1])
}

/// Per-bucket record counts. Records outside every bucket are left out.
pub fn histogram(dataset: &PlayerDataset) -> [u32; BUCKET_COUNT] {
    let mut counts = [0u32; BUCKET_COUNT];
    for record in dataset {
        if let Some(i) = bucket_index(record.reaction_time_ms()) {
            counts[i] += 1;
        }
    }
    counts
}

/// Histogram counts paired with their bucket edges.
pub fn buckets(dataset: &PlayerDataset) -> [HistogramBucket; BUCKET_COUNT] {
    let counts = histogram(dataset);
    std::array::from_fn(|i| HistogramBucket {
        lower_bound_ms: BUCKET_BOUNDS_MS[i],
        upper_bound_ms: BUCKET_BOUNDS_MS[i + 1],
        count: counts[i],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(times: &[(&str, u32)]) -> PlayerDataset {
        PlayerDataset::from_records(
            times
                .iter()
                .map(|(name, t)| PlayerRecord::new(*name, *t).unwrap())
                .collect(),
        )
    }

    #[test]
    fn empty_dataset_yields_zeros() {
        let empty = PlayerDataset::new();
        assert!(top_n(&empty, 5).is_empty());
        assert_eq!(best(&empty), 0);
        assert_eq!(mean(&empty), 0.0);
        assert_eq!(histogram(&empty), [0; BUCKET_COUNT]);
    }

    #[test]
    fn single_record() {
        let d = dataset(&[("Ana", 180)]);
        assert_eq!(best(&d), 180);
        assert_eq!(mean(&d), 180.0);
        let h = histogram(&d);
        assert_eq!(h[0], 1);
        assert_eq!(h[1..].iter().sum::<u32>(), 0);
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(bucket_index(199), Some(0));
        assert_eq!(bucket_index(200), Some(1));
        assert_eq!(bucket_index(379), Some(9));
        assert_eq!(bucket_index(380), None);
        assert_eq!(bucket_index(5000), None);
    }

    #[test]
    fn top_n_orders_by_time_and_keeps_ties_stable() {
        let d = dataset(&[
            ("Slow", 400),
            ("First", 250),
            ("Fast", 190),
            ("Second", 250),
            ("Mid", 300),
            ("Last", 500),
        ]);
        let names: Vec<&str> = top_n(&d, 5).iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Fast", "First", "Second", "Mid", "Slow"]);
        assert_eq!(top_n(&d, 2).len(), 2);
        assert_eq!(top_n(&d, 50).len(), 6);
    }

    #[test]
    fn mean_of_several() {
        let d = dataset(&[("a", 200), ("b", 300), ("c", 401)]);
        assert!((mean(&d) - 300.333_333).abs() < 1e-3);
        assert_eq!(best(&d), 200);
    }

    #[test]
    fn bucket_labels() {
        let b = buckets(&PlayerDataset::new());
        assert_eq!(b[0].label(), "0-199");
        assert_eq!(b[4].label(), "260-279");
        assert_eq!(b[9].label(), "360-380");
    }
}
