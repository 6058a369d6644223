//! Analyze tab: upload a leaf photo, run the classification, persist the
//! outcome, and show the result card.

mod result;
mod upload;

pub use result::PredictionCard;
pub use upload::{ImageUploadField, SelectedImage};

use api::{AnalysisRecord, Fault, NewAnalysis, Session};
use dioxus::prelude::*;
use time::format_description::well_known::Rfc3339;

#[component]
pub fn AnalysisPanel() -> Element {
    let sessions: Signal<Option<Session>> = use_context();
    let mut selection = use_signal(|| None::<SelectedImage>);
    let mut prediction = use_signal(|| None::<AnalysisRecord>);
    let mut analyzing = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let run_analysis = move |_| {
        let Some(image) = selection() else { return };
        let Some(session) = sessions() else {
            error.set(Some("Please sign in to analyze leaves.".into()));
            return;
        };
        if analyzing() {
            return;
        }
        analyzing.set(true);
        error.set(None);

        spawn(async move {
            match api::classify_image(session.token.clone(), image.bytes.clone()).await {
                Ok(outcome) => {
                    let submission = NewAnalysis {
                        image_url: image.preview.clone(),
                        label: outcome.label.clone(),
                        confidence: outcome.confidence,
                    };
                    match api::save_analysis(session.token.clone(), submission).await {
                        Ok(record) => prediction.set(Some(record)),
                        Err(err) => {
                            // The result is still shown; only persistence failed.
                            tracing::warn!(
                                "analysis completed but could not be saved: {}",
                                Fault::from_server_error(&err)
                            );
                            prediction.set(Some(unsaved_record(&session, &image, outcome)));
                        }
                    }
                }
                Err(err) => {
                    let message = match Fault::from_server_error(&err) {
                        Fault::AuthenticationRequired => {
                            "Your session has expired. Please sign in again.".to_string()
                        }
                        fault => {
                            tracing::error!("classification failed: {fault}");
                            "Analysis failed. Please try again.".to_string()
                        }
                    };
                    error.set(Some(message));
                }
            }
            analyzing.set(false);
        });
    };

    let reset = move |_| {
        selection.set(None);
        prediction.set(None);
        error.set(None);
    };

    let selected_meta = if !analyzing() && prediction().is_none() {
        selection().map(|image| format!("{} ({:.2} MB)", image.name, image.size_mb()))
    } else {
        None
    };

    rsx! {
        div { class: "analysis-panel",
            div { class: "analysis-panel__upload",
                section { class: "card",
                    div { class: "card__header",
                        h2 { "Image Upload" }
                    }
                    p { class: "card__description",
                        "Upload a clear photo of an apple leaf for disease detection."
                    }

                    ImageUploadField { selection, disabled: analyzing() }

                    if let Some(meta) = selected_meta {
                        div { class: "analysis-panel__selected",
                            span { class: "analysis-panel__filename", "{meta}" }
                            button {
                                r#type: "button",
                                class: "button button--primary",
                                onclick: run_analysis,
                                "Analyze Leaf"
                            }
                        }
                    }

                    if analyzing() {
                        div { class: "analysis-panel__progress",
                            span { "Analyzing leaf image…" }
                            div { class: "progress progress--indeterminate",
                                div { class: "progress__fill" }
                            }
                            p { class: "card__placeholder",
                                "Our AI model is examining the leaf for signs of disease."
                            }
                        }
                    }

                    if let Some(message) = error() {
                        div { class: "alert alert--error",
                            span { "{message}" }
                            if selection().is_some() {
                                button {
                                    r#type: "button",
                                    class: "button button--ghost",
                                    onclick: run_analysis,
                                    "Retry"
                                }
                            }
                        }
                    }
                }

                section { class: "card analysis-panel__tips",
                    div { class: "card__header",
                        h2 { "Tips for Best Results" }
                    }
                    ul {
                        li {
                            strong { "Clear, well-lit photos. " }
                            "Ensure the leaf is clearly visible with good lighting."
                        }
                        li {
                            strong { "Single leaf focus. " }
                            "Frame one leaf at a time for accurate detection."
                        }
                        li {
                            strong { "High resolution. " }
                            "Use high-quality images for better analysis."
                        }
                    }
                }
            }

            div { class: "analysis-panel__result",
                if let Some(record) = prediction() {
                    PredictionCard { record, on_reset: reset }
                } else {
                    section { class: "card",
                        div { class: "card__header",
                            h2 { "Analysis Results" }
                        }
                        p { class: "card__placeholder",
                            "Upload and analyze a leaf image to see disease detection results."
                        }
                    }
                }
            }
        }
    }
}

/// Local stand-in shown when the store refused the write. Carries no id, so
/// it never appears in history.
fn unsaved_record(
    session: &Session,
    image: &SelectedImage,
    outcome: api::ClassificationOutcome,
) -> AnalysisRecord {
    let now = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let recommendations = api::advice::recommendations_for(&outcome.label, outcome.confidence);
    AnalysisRecord {
        id: String::new(),
        owner_id: session.user.id.clone(),
        image_url: image.preview.clone(),
        label: outcome.label,
        confidence: outcome.confidence,
        recommendations: Some(recommendations),
        created_at: now.clone(),
        updated_at: now,
    }
}
