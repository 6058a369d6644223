//! Report rendering: printable documents and the CSV history export.
//!
//! Builders are pure string producers so they stay testable; the hand-off to
//! the platform (new tab / file download) lives in `surface` and is the only
//! part with side effects. A refused surface never fails the caller.

mod document;
mod export;
mod surface;

pub use export::{build_history_csv, export_filename, HISTORY_CSV_HEADER};

use api::AnalysisRecord;
use time::OffsetDateTime;

use crate::core::stats::AnalysisStats;

/// Render one record as a printable document and hand it to a new surface.
pub fn open_analysis_report(record: &AnalysisRecord, user_label: &str) {
    let html = document::analysis_report_html(record, user_label, OffsetDateTime::now_utc());
    if let Err(err) = surface::open_document("leaf-analysis-report.html", &html) {
        tracing::warn!("report surface unavailable: {err}");
    }
}

/// Render aggregated statistics as a printable document and hand it off.
pub fn open_summary_report(stats: &AnalysisStats, user_label: &str) {
    let html = document::summary_report_html(stats, user_label, OffsetDateTime::now_utc());
    if let Err(err) = surface::open_document("leaf-analysis-summary.html", &html) {
        tracing::warn!("report surface unavailable: {err}");
    }
}

/// Serialize the full history and hand it to the platform's file-save
/// mechanism. Returns a saved-to path off-web, `None` when the browser owns
/// the download.
pub fn export_history_csv(records: &[AnalysisRecord]) -> Result<Option<String>, String> {
    let csv = build_history_csv(records);
    let filename = export_filename(OffsetDateTime::now_utc());
    surface::download_bytes(&filename, "text/csv;charset=utf-8;", csv.into_bytes())
}
