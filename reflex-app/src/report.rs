use reflex_core::PlayerDataset;
use reflex_core::stats;
use std::fmt::Write as _;

/// Plain-text leaderboard and distribution of a dataset.
pub fn format_report(dataset: &PlayerDataset, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "players: {}", dataset.len());
    if dataset.is_empty() {
        out.push_str("No records yet\n");
        return out;
    }

    out.push_str("\nBest players:\n");
    for (rank, record) in stats::top_n(dataset, top).iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<20} {:>6} ms",
            rank + 1,
            record.name(),
            record.reaction_time_ms()
        );
    }
    let _ = writeln!(out, "\nbest: {} ms", stats::best(dataset));
    let _ = writeln!(out, "mean: {:.1} ms", stats::mean(dataset));

    out.push_str("\nDistribution:\n");
    for bucket in stats::buckets(dataset) {
        let _ = writeln!(
            out,
            "{:>9} | {:<5} {}",
            bucket.label(),
            bucket.count,
            "#".repeat(bucket.count.min(60) as usize)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflex_core::PlayerRecord;

    #[test]
    fn empty_dataset() {
        assert_eq!(format_report(&PlayerDataset::new(), 5), "players: 0\nNo records yet\n");
    }

    #[test]
    fn lists_leaders_and_buckets() {
        let dataset = PlayerDataset::from_records(vec![
            PlayerRecord::new("Leo", 305).unwrap(),
            PlayerRecord::new("Ana", 180).unwrap(),
            PlayerRecord::new("Mo", 410).unwrap(),
        ]);
        let report = format_report(&dataset, 2);
        assert!(report.contains("  1. Ana"));
        assert!(report.contains("  2. Leo"));
        assert!(!report.contains("Mo "));
        assert!(report.contains("best: 180 ms"));
        assert!(report.contains("mean: 298.3 ms"));
        assert!(report.contains("    0-199 | 1     #"));
        assert!(report.contains("  360-380 | 0"));
    }
}
