//! CSV serialization of the analysis history.

use api::AnalysisRecord;
use time::OffsetDateTime;

use crate::core::format;

/// Fixed first line of every export. Consumers key on these column names.
pub const HISTORY_CSV_HEADER: &str = "Date,Time,Result,Confidence (%),Status,Recommendations";

/// One row per record, in the order given. Zero records yields exactly the
/// header line.
pub fn build_history_csv(records: &[AnalysisRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HISTORY_CSV_HEADER.to_string());

    for record in records {
        let (date, time) = match format::parse_timestamp(&record.created_at) {
            Some(stamp) => (format::export_date(stamp), format::export_time(stamp)),
            // Unparseable timestamps surface raw rather than vanishing.
            None => (record.created_at.clone(), String::new()),
        };

        let (status, actions) = match &record.recommendations {
            Some(payload) => (payload.status().to_string(), payload.actions().join("; ")),
            None => ("unknown".to_string(), "No recommendations".to_string()),
        };

        let row = [
            date,
            time,
            record.label.clone(),
            format::confidence_percent(record.confidence),
            status,
            actions,
        ];
        lines.push(
            row.iter()
                .map(|field| escape_csv(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

/// Download name carrying the current calendar date, e.g.
/// `leaf-analysis-history-2026-08-29.csv`.
pub fn export_filename(today: OffsetDateTime) -> String {
    format!("leaf-analysis-history-{}.csv", format::export_date(today))
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{advice, Recommendations};

    fn record(label: &str, confidence: f64) -> AnalysisRecord {
        AnalysisRecord {
            id: "r1".into(),
            owner_id: "owner".into(),
            image_url: String::new(),
            label: label.into(),
            confidence,
            recommendations: Some(advice::recommendations_for(label, confidence)),
            created_at: "2026-08-29T14:03:27Z".into(),
            updated_at: "2026-08-29T14:03:27Z".into(),
        }
    }

    /// Minimal quoted-field parser for round-trip checks.
    fn parse_row(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn empty_history_is_exactly_the_header() {
        assert_eq!(build_history_csv(&[]), HISTORY_CSV_HEADER);
    }

    #[test]
    fn rows_follow_the_column_contract() {
        let csv = build_history_csv(&[record("Apple Scab", 0.87)]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HISTORY_CSV_HEADER));

        let fields = parse_row(lines.next().expect("one data row"));
        assert_eq!(
            fields,
            vec![
                "2026-08-29".to_string(),
                "14:03:27".to_string(),
                "Apple Scab".to_string(),
                "87.0".to_string(),
                "diseased".to_string(),
                advice::recommendations_for("Apple Scab", 0.87)
                    .actions()
                    .join("; "),
            ]
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn round_trip_recovers_label_confidence_and_status() {
        let original = record("Scab, \"late\" stage", 0.876);
        let csv = build_history_csv(&[original.clone()]);
        let fields = parse_row(csv.lines().nth(1).expect("data row"));

        assert_eq!(fields[2], original.label);
        assert_eq!(
            fields[3],
            crate::core::format::confidence_percent(original.confidence)
        );
        assert_eq!(fields[4], "diseased");
    }

    #[test]
    fn missing_recommendations_export_as_unknown() {
        let mut rec = record("Apple Rust", 0.79);
        rec.recommendations = None;
        let csv = build_history_csv(&[rec]);
        let fields = parse_row(csv.lines().nth(1).expect("data row"));
        assert_eq!(fields[4], "unknown");
        assert_eq!(fields[5], "No recommendations");
    }

    #[test]
    fn malformed_payload_never_reaches_the_export() {
        // The store boundary already decodes; a malformed blob becomes `None`.
        assert_eq!(Recommendations::from_stored("{broken"), None);
    }

    #[test]
    fn filename_carries_the_calendar_date() {
        let today = crate::core::format::parse_timestamp("2026-08-29T00:00:00Z").expect("parses");
        assert_eq!(
            export_filename(today),
            "leaf-analysis-history-2026-08-29.csv"
        );
    }
}
