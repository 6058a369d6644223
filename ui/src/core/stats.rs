//! Aggregation of a user's analysis history into summary statistics.

use std::collections::HashMap;

use api::AnalysisRecord;

/// How many records the "recent" strip shows.
const RECENT_LIMIT: usize = 5;

/// Derived summary over the full record set. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisStats {
    pub total_analyses: usize,
    pub healthy_count: usize,
    pub diseased_count: usize,
    /// Arithmetic mean confidence; 0 for an empty set.
    pub avg_confidence: f64,
    /// Mode over diseased labels; `None` when no diseased records exist.
    pub most_common_disease: Option<String>,
    /// Up to five records, newest first.
    pub recent_analyses: Vec<AnalysisRecord>,
}

impl AnalysisStats {
    /// Aggregate the given records. Input order may be anything; the result is
    /// deterministic for a given input sequence.
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        let total_analyses = records.len();
        let healthy_count = records.iter().filter(|r| r.is_healthy()).count();
        let diseased_count = total_analyses - healthy_count;

        let avg_confidence = if total_analyses > 0 {
            records.iter().map(|r| r.confidence).sum::<f64>() / total_analyses as f64
        } else {
            0.0
        };

        Self {
            total_analyses,
            healthy_count,
            diseased_count,
            avg_confidence,
            most_common_disease: most_common_disease(records),
            recent_analyses: recent(records),
        }
    }

    pub fn healthy_percent(&self) -> f64 {
        percent_of(self.healthy_count, self.total_analyses)
    }

    pub fn diseased_percent(&self) -> f64 {
        percent_of(self.diseased_count, self.total_analyses)
    }
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Mode over diseased labels. Ties go to whichever label reached the winning
/// tally first in input order, so the result never depends on hash iteration
/// order.
fn most_common_disease(records: &[AnalysisRecord]) -> Option<String> {
    let mut tallies: HashMap<&str, usize> = HashMap::new();
    let mut best: Option<(&str, usize)> = None;

    for record in records.iter().filter(|r| !r.is_healthy()) {
        let tally = tallies.entry(record.label.as_str()).or_insert(0);
        *tally += 1;
        match best {
            Some((_, count)) if *tally <= count => {}
            _ => best = Some((record.label.as_str(), *tally)),
        }
    }

    best.map(|(label, _)| label.to_string())
}

/// The five most recent records by `created_at` descending. Stable sort keeps
/// input order for identical timestamps.
fn recent(records: &[AnalysisRecord]) -> Vec<AnalysisRecord> {
    let mut sorted: Vec<AnalysisRecord> = records.to_vec();
    // RFC 3339 UTC timestamps order lexicographically.
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, confidence: f64, created_at: &str) -> AnalysisRecord {
        AnalysisRecord {
            id: format!("{label}-{created_at}"),
            owner_id: "owner".into(),
            image_url: String::new(),
            label: label.into(),
            confidence,
            recommendations: None,
            created_at: created_at.into(),
            updated_at: created_at.into(),
        }
    }

    #[test]
    fn empty_set_has_zero_average_and_no_mode() {
        let stats = AnalysisStats::from_records(&[]);
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.avg_confidence, 0.0);
        assert_eq!(stats.most_common_disease, None);
        assert!(stats.recent_analyses.is_empty());
        assert_eq!(stats.healthy_percent(), 0.0);
    }

    #[test]
    fn healthy_plus_diseased_equals_total() {
        let records = vec![
            record("Healthy Leaf", 0.9, "2026-08-01T10:00:00Z"),
            record("Apple Scab", 0.8, "2026-08-02T10:00:00Z"),
            record("healthy again", 0.7, "2026-08-03T10:00:00Z"),
            record("Apple Rust", 0.6, "2026-08-04T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(
            stats.healthy_count + stats.diseased_count,
            stats.total_analyses
        );
    }

    #[test]
    fn worked_scenario_from_three_records() {
        let records = vec![
            record("Healthy Leaf", 0.9, "2026-08-01T10:00:00Z"),
            record("Apple Scab", 0.8, "2026-08-02T10:00:00Z"),
            record("Apple Scab", 0.7, "2026-08-03T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.total_analyses, 3);
        assert_eq!(stats.healthy_count, 1);
        assert_eq!(stats.diseased_count, 2);
        assert!((stats.avg_confidence - 0.8).abs() < 1e-12);
        assert_eq!(stats.most_common_disease.as_deref(), Some("Apple Scab"));
    }

    #[test]
    fn mode_tie_goes_to_first_label_reaching_the_tally() {
        let records = vec![
            record("A", 0.5, "2026-08-01T10:00:00Z"),
            record("B", 0.5, "2026-08-02T10:00:00Z"),
            record("A", 0.5, "2026-08-03T10:00:00Z"),
            record("B", 0.5, "2026-08-04T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.most_common_disease.as_deref(), Some("A"));
    }

    #[test]
    fn mode_ignores_healthy_labels() {
        let records = vec![
            record("Healthy Leaf", 0.9, "2026-08-01T10:00:00Z"),
            record("Healthy Leaf", 0.9, "2026-08-02T10:00:00Z"),
            record("Apple Rust", 0.6, "2026-08-03T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.most_common_disease.as_deref(), Some("Apple Rust"));
    }

    #[test]
    fn recent_takes_newest_five_regardless_of_input_order() {
        let mut records: Vec<AnalysisRecord> = (1..=7)
            .map(|day| record("Apple Scab", 0.5, &format!("2026-08-0{day}T10:00:00Z")))
            .collect();
        records.swap(0, 6);

        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.recent_analyses.len(), 5);
        assert_eq!(stats.recent_analyses[0].created_at, "2026-08-07T10:00:00Z");
        assert_eq!(stats.recent_analyses[4].created_at, "2026-08-03T10:00:00Z");
    }

    #[test]
    fn recent_returns_everything_when_fewer_than_five() {
        let records = vec![
            record("Apple Scab", 0.5, "2026-08-02T10:00:00Z"),
            record("Healthy Leaf", 0.9, "2026-08-01T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.recent_analyses.len(), 2);
        assert_eq!(stats.recent_analyses[0].label, "Apple Scab");
    }

    #[test]
    fn recent_ties_keep_input_order() {
        let records = vec![
            record("first", 0.5, "2026-08-01T10:00:00Z"),
            record("second", 0.5, "2026-08-01T10:00:00Z"),
        ];
        let stats = AnalysisStats::from_records(&records);
        assert_eq!(stats.recent_analyses[0].label, "first");
        assert_eq!(stats.recent_analyses[1].label, "second");
    }
}
