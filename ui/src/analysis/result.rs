use api::{AnalysisRecord, Session};
use dioxus::prelude::*;

use crate::core::format;
use crate::report;

/// Result card for a completed analysis: label, confidence indicator, advice,
/// and the printable-report hand-off.
#[component]
pub fn PredictionCard(record: AnalysisRecord, on_reset: EventHandler<()>) -> Element {
    let session_ctx: Option<Signal<Option<Session>>> = try_use_context();
    let healthy = record.is_healthy();
    let confidence_percent = format::confidence_percent(record.confidence);
    let timestamp = format::display_timestamp(&record.created_at);

    let badge = if healthy {
        ("badge badge--healthy", "Healthy")
    } else {
        ("badge badge--diseased", "Disease Detected")
    };

    let download = {
        let record = record.clone();
        move |_| {
            let user_label = session_ctx
                .as_ref()
                .and_then(|signal| signal())
                .map(|session| session.user.email)
                .unwrap_or_else(|| "Unknown User".to_string());
            report::open_analysis_report(&record, &user_label);
        }
    };

    rsx! {
        section { class: "card prediction-card",
            div { class: "card__header",
                h2 { "Analysis Results" }
                span { class: badge.0, "{badge.1}" }
            }

            div { class: "prediction-card__result",
                h3 { class: if healthy { "prediction-card__label prediction-card__label--healthy" } else { "prediction-card__label prediction-card__label--diseased" },
                    "{record.label}"
                }
                span { class: "prediction-card__timestamp", "{timestamp}" }
            }

            div { class: "prediction-card__confidence",
                div { class: "prediction-card__confidence-heading",
                    span { "Confidence" }
                    span { "{confidence_percent}%" }
                }
                div { class: "progress",
                    div {
                        class: if healthy { "progress__fill progress__fill--healthy" } else { "progress__fill progress__fill--diseased" },
                        style: "width: {confidence_percent}%",
                    }
                }
            }

            div { class: "prediction-card__recommendations",
                h4 { "Recommendations" }
                match &record.recommendations {
                    Some(payload) => rsx! {
                        ul {
                            for action in payload.actions().iter() {
                                li { "{action}" }
                            }
                        }
                    },
                    None => rsx! {
                        p { class: "card__placeholder", "No specific recommendations available." }
                    },
                }
            }

            div { class: "prediction-card__actions",
                button {
                    r#type: "button",
                    class: "button",
                    onclick: download,
                    "Download Report"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_reset.call(()),
                    "Analyze Another"
                }
            }
        }
    }
}
