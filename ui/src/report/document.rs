//! Printable HTML documents: one per record, one for the aggregated summary.
//!
//! Styling is inlined so the documents render offline and print directly.
//! Given the same input and `generated_at`, the output is byte-identical.

use api::AnalysisRecord;
use time::OffsetDateTime;

use crate::core::format;
use crate::core::stats::AnalysisStats;

const BRAND: &str = "🍃 LeafGuard AI";

const REPORT_STYLES: &str = r#"
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
  }
  .header {
    text-align: center;
    border-bottom: 2px solid #22c55e;
    padding-bottom: 20px;
    margin-bottom: 30px;
  }
  .logo {
    font-size: 24px;
    font-weight: bold;
    color: #22c55e;
    margin-bottom: 10px;
  }
  .result-card {
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 20px;
    margin: 20px 0;
  }
  .result-card--healthy { background: #f0fdf4; }
  .result-card--diseased { background: #fef3c7; }
  .result-title { font-size: 20px; font-weight: bold; margin-bottom: 10px; }
  .result-title--healthy { color: #15803d; }
  .result-title--diseased { color: #d97706; }
  .confidence-bar {
    width: 100%;
    height: 20px;
    background: #e5e7eb;
    border-radius: 10px;
    overflow: hidden;
    margin: 10px 0;
  }
  .confidence-fill { height: 100%; }
  .confidence-fill--healthy { background: #22c55e; }
  .confidence-fill--diseased { background: #f59e0b; }
  .recommendations {
    background: white;
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 20px;
    margin: 20px 0;
  }
  .recommendations h3 { color: #374151; margin-top: 0; }
  .recommendations ul { padding-left: 20px; }
  .recommendations li { margin: 8px 0; }
  .metadata {
    background: #f9fafb;
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 15px;
    margin: 20px 0;
    font-size: 14px;
    color: #6b7280;
  }
  .stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 20px;
    margin: 30px 0;
  }
  .stat-card {
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 20px;
    text-align: center;
    background: white;
  }
  .stat-number { font-size: 32px; font-weight: bold; color: #22c55e; margin-bottom: 5px; }
  .stat-number--disease { font-size: 18px; color: #d97706; }
  .stat-label { color: #6b7280; font-size: 14px; }
  .recent-analyses { margin: 30px 0; }
  .analysis-item {
    border: 1px solid #e5e7eb;
    border-radius: 6px;
    padding: 15px;
    margin: 10px 0;
    background: #f9fafb;
  }
  .analysis-date { font-size: 12px; color: #6b7280; }
  .analysis-result { font-weight: bold; margin: 5px 0; }
  .healthy { color: #15803d; }
  .diseased { color: #d97706; }
  .footer {
    text-align: center;
    margin-top: 40px;
    padding-top: 20px;
    border-top: 1px solid #e5e7eb;
    font-size: 12px;
    color: #9ca3af;
  }
  @media print {
    body { margin: 0; padding: 15px; }
    .stats-grid { grid-template-columns: repeat(2, 1fr); }
  }
"#;

fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{REPORT_STYLES}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Self-contained printable report for one analysis record.
pub fn analysis_report_html(
    record: &AnalysisRecord,
    user_label: &str,
    generated_at: OffsetDateTime,
) -> String {
    let healthy = record.is_healthy();
    let tone = if healthy { "healthy" } else { "diseased" };
    let confidence_percent = format::confidence_percent(record.confidence);
    let status_line = if healthy {
        "Healthy Leaf Detected"
    } else {
        "Disease Detected - Action Required"
    };

    let actions_html = match &record.recommendations {
        Some(payload) if !payload.actions().is_empty() => {
            let items: String = payload
                .actions()
                .iter()
                .map(|action| format!("<li>{}</li>", escape_html(action)))
                .collect();
            format!("<ul>{items}</ul>")
        }
        _ => "<p>No specific recommendations available.</p>".to_string(),
    };

    let analysed_at = format::parse_timestamp(&record.created_at)
        .map(format::report_timestamp)
        .unwrap_or_else(|| record.created_at.clone());

    let body = format!(
        r#"<div class="header">
  <div class="logo">{BRAND}</div>
  <h1>Leaf Disease Analysis Report</h1>
</div>

<div class="result-card result-card--{tone}">
  <div class="result-title result-title--{tone}">{label}</div>
  <p><strong>Confidence Score:</strong> {confidence_percent}%</p>
  <div class="confidence-bar">
    <div class="confidence-fill confidence-fill--{tone}" style="width: {confidence_percent}%"></div>
  </div>
  <p><strong>Status:</strong> {status_line}</p>
</div>

<div class="recommendations">
  <h3>Recommendations</h3>
  {actions_html}
</div>

<div class="metadata">
  <p><strong>Analysis Date:</strong> {analysed_at}</p>
  <p><strong>User:</strong> {user}</p>
  <p><strong>Report Generated:</strong> {generated}</p>
</div>

<div class="footer">
  <p>This report was generated by LeafGuard AI - Advanced Leaf Disease Detection System</p>
  <p>For questions or support, please contact your agricultural extension office.</p>
</div>"#,
        label = escape_html(&record.label),
        user = escape_html(user_label),
        generated = format::report_timestamp(generated_at),
    );

    shell("LeafGuard AI - Analysis Report", &body)
}

/// Printable overview of the aggregated statistics.
pub fn summary_report_html(
    stats: &AnalysisStats,
    user_label: &str,
    generated_at: OffsetDateTime,
) -> String {
    let disease_callout = match &stats.most_common_disease {
        Some(disease) => format!(
            r#"<div class="stat-card" style="margin: 20px 0;">
  <h3>Most Common Disease</h3>
  <div class="stat-number stat-number--disease">{}</div>
</div>"#,
            escape_html(disease)
        ),
        None => String::new(),
    };

    let recent_items: String = stats
        .recent_analyses
        .iter()
        .map(|record| {
            let tone = if record.is_healthy() { "healthy" } else { "diseased" };
            format!(
                r#"<div class="analysis-item">
  <div class="analysis-date">{stamp}</div>
  <div class="analysis-result {tone}">{label} ({confidence}% confidence)</div>
</div>"#,
                stamp = format::display_timestamp(&record.created_at),
                label = escape_html(&record.label),
                confidence = format::confidence_percent(record.confidence),
            )
        })
        .collect();

    let body = format!(
        r#"<div class="header">
  <div class="logo">{BRAND}</div>
  <h1>Analysis Summary Report</h1>
  <p>User: {user}</p>
</div>

<div class="stats-grid">
  <div class="stat-card">
    <div class="stat-number">{total}</div>
    <div class="stat-label">Total Analyses</div>
  </div>
  <div class="stat-card">
    <div class="stat-number">{healthy_pct}%</div>
    <div class="stat-label">Healthy Leaves</div>
  </div>
  <div class="stat-card">
    <div class="stat-number">{diseased_pct}%</div>
    <div class="stat-label">Diseased Leaves</div>
  </div>
  <div class="stat-card">
    <div class="stat-number">{avg_confidence}%</div>
    <div class="stat-label">Avg Confidence</div>
  </div>
</div>

{disease_callout}

<div class="recent-analyses">
  <h3>Recent Analyses</h3>
  {recent_items}
</div>

<div class="footer">
  <p>Report generated on {generated}</p>
  <p>LeafGuard AI - Advanced Leaf Disease Detection System</p>
</div>"#,
        user = escape_html(user_label),
        total = stats.total_analyses,
        healthy_pct = format::percent(stats.healthy_percent()),
        diseased_pct = format::percent(stats.diseased_percent()),
        avg_confidence = format::confidence_percent(stats.avg_confidence),
        generated = format::report_timestamp(generated_at),
    );

    shell("LeafGuard AI - Summary Report", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::advice;

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

    fn fixed_now() -> OffsetDateTime {
        format::parse_timestamp("2026-08-29T15:00:00Z").expect("parses")
    }

    #[test]
    fn analysis_report_is_deterministic_for_fixed_inputs() {
        let rec = record("Apple Scab", 0.87);
        let first = analysis_report_html(&rec, "demo@example.com", fixed_now());
        let second = analysis_report_html(&rec, "demo@example.com", fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn analysis_report_embeds_percentage_and_indicator_width() {
        let html = analysis_report_html(&record("Apple Scab", 0.876), "demo@example.com", fixed_now());
        assert!(html.contains("87.6%"));
        assert!(html.contains("width: 87.6%"));
        assert!(html.contains("Disease Detected - Action Required"));
        assert!(html.contains("Consult with a local agricultural extension office"));
    }

    #[test]
    fn analysis_report_without_recommendations_says_so() {
        let mut rec = record("Apple Rust", 0.79);
        rec.recommendations = None;
        let html = analysis_report_html(&rec, "demo@example.com", fixed_now());
        assert!(html.contains("No specific recommendations available."));
    }

    #[test]
    fn analysis_report_escapes_labels() {
        let html = analysis_report_html(
            &record("<script>alert(1)</script>", 0.5),
            "demo@example.com",
            fixed_now(),
        );
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn summary_report_shows_headline_numbers() {
        let stats = crate::core::stats::AnalysisStats::from_records(&[
            record("Healthy Leaf", 0.9),
            record("Apple Scab", 0.8),
            record("Apple Scab", 0.7),
        ]);
        let html = summary_report_html(&stats, "demo@example.com", fixed_now());
        assert!(html.contains(">3<"));
        assert!(html.contains("33.3%"));
        assert!(html.contains("66.7%"));
        assert!(html.contains("80.0%"));
        assert!(html.contains("Most Common Disease"));
        assert!(html.contains("Apple Scab"));
    }

    #[test]
    fn summary_report_omits_callout_without_diseased_records() {
        let stats = crate::core::stats::AnalysisStats::from_records(&[record("Healthy Leaf", 0.9)]);
        let html = summary_report_html(&stats, "demo@example.com", fixed_now());
        assert!(!html.contains("Most Common Disease"));
    }
}
