//! Summary tab: aggregate statistics over the signed-in user's analyses,
//! plus CSV export and a printable summary report.

use api::{AnalysisRecord, Fault, Session};
use dioxus::prelude::*;

use crate::core::format;
use crate::core::stats::AnalysisStats;
use crate::report;

/// Upper bound on rows pulled for the CSV export.
const EXPORT_FETCH_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq)]
struct SummaryState {
    stats: AnalysisStats,
    failed: bool,
}

#[derive(Clone, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

async fn load_summary(session: Option<Session>) -> SummaryState {
    let Some(session) = session else {
        return SummaryState::default();
    };
    match api::list_analyses(session.token, None).await {
        Ok(records) => SummaryState {
            stats: AnalysisStats::from_records(&records),
            failed: false,
        },
        Err(err) => {
            tracing::error!("failed to load summary: {}", Fault::from_server_error(&err));
            SummaryState {
                stats: AnalysisStats::default(),
                failed: true,
            }
        }
    }
}

#[component]
pub fn SummaryPanel() -> Element {
    let sessions: Signal<Option<Session>> = use_context();
    let mut summary = use_resource(move || load_summary(sessions()));
    let mut export_status = use_signal(|| ExportStatus::Idle);

    let state = summary().unwrap_or_default();
    let stats = state.stats.clone();

    let export_csv = move |_| {
        let Some(session) = sessions() else { return };
        export_status.set(ExportStatus::Working);
        spawn(async move {
            let records: Vec<AnalysisRecord> =
                match api::list_analyses(session.token, Some(EXPORT_FETCH_LIMIT)).await {
                    Ok(records) => records,
                    Err(err) => {
                        tracing::error!(
                            "export fetch failed: {}",
                            Fault::from_server_error(&err)
                        );
                        export_status
                            .set(ExportStatus::Error("Couldn't fetch your history.".into()));
                        return;
                    }
                };
            match report::export_history_csv(&records) {
                Ok(Some(filename)) => export_status.set(ExportStatus::Done(filename)),
                Ok(None) => export_status.set(ExportStatus::Idle),
                Err(message) => export_status.set(ExportStatus::Error(message)),
            }
        });
    };

    let open_report = {
        let stats = stats.clone();
        move |_| {
            let user_label = sessions()
                .map(|session| session.user.email)
                .unwrap_or_else(|| "Unknown User".to_string());
            report::open_summary_report(&stats, &user_label);
        }
    };

    if state.failed {
        return rsx! {
            div { class: "summary-panel",
                div { class: "alert alert--error",
                    span { "Unable to load statistics." }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| summary.restart(),
                        "Retry"
                    }
                }
            }
        };
    }

    let healthy_pct = format::percent(stats.healthy_percent());
    let diseased_pct = format::percent(stats.diseased_percent());
    let avg_confidence = format::confidence_percent(stats.avg_confidence);
    let healthy_style = format!("width: {healthy_pct}%");
    let diseased_style = format!("width: {diseased_pct}%");

    rsx! {
        div { class: "summary-panel",
            div { class: "summary-panel__header",
                h2 { "Analysis Summary" }
                div { class: "summary-panel__actions",
                    button {
                        r#type: "button",
                        class: "button button--secondary",
                        disabled: export_status() == ExportStatus::Working,
                        onclick: export_csv,
                        if export_status() == ExportStatus::Working { "Exporting…" } else { "Export CSV" }
                    }
                    button {
                        r#type: "button",
                        class: "button button--secondary",
                        onclick: open_report,
                        "Download Summary"
                    }
                }
            }

            match export_status() {
                ExportStatus::Done(filename) => rsx! {
                    div { class: "alert alert--success", "Exported {filename}" }
                },
                ExportStatus::Error(message) => rsx! {
                    div { class: "alert alert--error", "{message}" }
                },
                _ => rsx! {},
            }

            div { class: "summary-panel__cards",
                StatCard { label: "Total Analyses", value: stats.total_analyses.to_string() }
                StatCard { label: "Healthy", value: stats.healthy_count.to_string() }
                StatCard { label: "Diseased", value: stats.diseased_count.to_string() }
                StatCard { label: "Avg Confidence", value: format!("{avg_confidence}%") }
            }

            section { class: "card summary-panel__distribution",
                h3 { "Health Distribution" }
                div { class: "progress",
                    span { class: "progress__label", "Healthy · {healthy_pct}%" }
                    div { class: "progress__track",
                        div { class: "progress__fill progress__fill--healthy", style: "{healthy_style}" }
                    }
                }
                div { class: "progress",
                    span { class: "progress__label", "Diseased · {diseased_pct}%" }
                    div { class: "progress__track",
                        div { class: "progress__fill progress__fill--diseased", style: "{diseased_style}" }
                    }
                }
            }

            if let Some(disease) = stats.most_common_disease.as_ref() {
                div { class: "alert alert--warning summary-panel__callout",
                    strong { "Most common disease: " }
                    span { "{disease}" }
                }
            }

            section { class: "card summary-panel__recent",
                h3 { "Recent Analyses" }
                if stats.recent_analyses.is_empty() {
                    p { class: "card__placeholder", "Nothing analyzed yet." }
                } else {
                    ul { class: "summary-panel__recent-list",
                        for record in stats.recent_analyses.iter() {
                            RecentRow { key: "{record.id}", record: record.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div { class: "card stat-card",
            span { class: "stat-card__value", "{value}" }
            span { class: "stat-card__label", "{label}" }
        }
    }
}

#[component]
fn RecentRow(record: AnalysisRecord) -> Element {
    let healthy = record.is_healthy();
    let timestamp = format::display_timestamp(&record.created_at);
    let confidence = format::confidence_percent(record.confidence);

    rsx! {
        li { class: "summary-panel__recent-item",
            span {
                class: if healthy { "badge badge--healthy" } else { "badge badge--diseased" },
                if healthy { "Healthy" } else { "Diseased" }
            }
            span { class: "summary-panel__recent-label", "{record.label}" }
            span { class: "summary-panel__recent-confidence", "{confidence}%" }
            span { class: "summary-panel__recent-time", "{timestamp}" }
        }
    }
}
