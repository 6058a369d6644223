//! Formatting helpers for confidences and timestamps.

use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

/// Confidence in `[0, 1]` as a percentage string with one decimal, e.g. "92.0".
pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}", confidence * 100.0)
}

/// One-decimal percentage for values already in `[0, 100]`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}")
}

pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}

/// Calendar-date cell for tabular exports.
pub fn export_date(stamp: OffsetDateTime) -> String {
    stamp
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "—".to_string())
}

/// Clock-time cell for tabular exports.
pub fn export_time(stamp: OffsetDateTime) -> String {
    stamp
        .format(&format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "—".to_string())
}

/// Compact display label for a stored RFC 3339 timestamp, e.g.
/// "2026-08-29 · 14:03". Falls back to the raw string when it doesn't parse.
pub fn display_timestamp(raw: &str) -> String {
    let (date, time_segment) = raw.split_once('T').unwrap_or((raw, ""));

    let clock = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or(time_segment);
    let clock: String = clock.chars().take(5).collect();

    if clock.is_empty() {
        date.to_string()
    } else {
        format!("{date} · {clock}")
    }
}

/// Long-form label for report metadata, e.g. "2026-08-29 14:03:27 UTC".
pub fn report_timestamp(stamp: OffsetDateTime) -> String {
    stamp
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        ))
        .unwrap_or_else(|_| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_rounds_to_one_decimal() {
        assert_eq!(confidence_percent(0.92), "92.0");
        assert_eq!(confidence_percent(0.8765), "87.7");
        assert_eq!(confidence_percent(0.0), "0.0");
        assert_eq!(confidence_percent(1.0), "100.0");
    }

    #[test]
    fn display_timestamp_trims_to_minutes() {
        assert_eq!(
            display_timestamp("2026-08-29T14:03:27Z"),
            "2026-08-29 · 14:03"
        );
        assert_eq!(
            display_timestamp("2026-08-29T14:03:27.123+00:00"),
            "2026-08-29 · 14:03"
        );
        assert_eq!(display_timestamp("garbage"), "garbage");
    }

    #[test]
    fn export_cells_are_iso_like() {
        let stamp = parse_timestamp("2026-08-29T14:03:27Z").expect("parses");
        assert_eq!(export_date(stamp), "2026-08-29");
        assert_eq!(export_time(stamp), "14:03:27");
    }
}
