use api::AnalysisRecord;
use dioxus::prelude::*;

use crate::core::format;

/// Modal showing a single analysis in full: image, verdict, confidence,
/// recommendations, and timestamps.
#[component]
pub fn DetailModal(selected: Signal<Option<AnalysisRecord>>) -> Element {
    let Some(record) = selected() else {
        return rsx! {};
    };

    let healthy = record.is_healthy();
    let confidence = format::confidence_percent(record.confidence);
    let bar_style = format!("width: {confidence}%");
    let created = format::display_timestamp(&record.created_at);
    let updated = format::display_timestamp(&record.updated_at);

    rsx! {
        div { class: "modal-backdrop", onclick: move |_| selected.set(None),
            div { class: "modal", onclick: move |evt| evt.stop_propagation(),
                div { class: "modal__header",
                    h3 { "Analysis Detail" }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        onclick: move |_| selected.set(None),
                        "×"
                    }
                }

                if !record.image_url.is_empty() {
                    img { class: "modal__image", src: "{record.image_url}", alt: "Analyzed leaf" }
                }

                div { class: "modal__verdict",
                    span {
                        class: if healthy { "badge badge--healthy" } else { "badge badge--diseased" },
                        if healthy { "Healthy" } else { "Diseased" }
                    }
                    span { class: "modal__label", "{record.label}" }
                }

                div { class: "progress",
                    div { class: "progress__track",
                        div {
                            class: if healthy { "progress__fill progress__fill--healthy" } else { "progress__fill progress__fill--diseased" },
                            style: "{bar_style}",
                        }
                    }
                    span { class: "progress__value", "{confidence}% confidence" }
                }

                match record.recommendations.as_ref() {
                    Some(recommendations) => rsx! {
                        div { class: "modal__recommendations",
                            h4 { "Recommendations" }
                            ul {
                                for action in recommendations.actions().iter() {
                                    li { "{action}" }
                                }
                            }
                        }
                    },
                    None => rsx! {
                        p { class: "card__placeholder", "No recommendations recorded for this analysis." }
                    },
                }

                div { class: "modal__timestamps",
                    span { "Analyzed: {created}" }
                    if record.updated_at != record.created_at {
                        span { "Updated: {updated}" }
                    }
                }
            }
        }
    }
}
