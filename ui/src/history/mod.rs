//! History tab: searchable, filterable list of past analyses with detail
//! modal, per-record report, and delete.

mod detail;

pub use detail::DetailModal;

use api::{AnalysisRecord, Fault, Session};
use dioxus::prelude::*;

use crate::core::format;
use crate::report;

/// How many rows the history view asks for.
const HISTORY_FETCH_LIMIT: usize = 100;

#[derive(Clone, Copy, PartialEq, Eq)]
enum HistoryFilter {
    All,
    Healthy,
    Diseased,
}

impl HistoryFilter {
    fn from_value(value: &str) -> Self {
        match value {
            "healthy" => Self::Healthy,
            "diseased" => Self::Diseased,
            _ => Self::All,
        }
    }

    fn matches(self, record: &AnalysisRecord) -> bool {
        match self {
            Self::All => true,
            Self::Healthy => record.is_healthy(),
            Self::Diseased => !record.is_healthy(),
        }
    }
}

/// Load result for the list: records or a user-facing error.
#[derive(Debug, Clone, Default, PartialEq)]
struct HistoryState {
    records: Vec<AnalysisRecord>,
    error: Option<String>,
}

async fn load_history(session: Option<Session>) -> HistoryState {
    let Some(session) = session else {
        return HistoryState::default();
    };
    match api::list_analyses(session.token, Some(HISTORY_FETCH_LIMIT)).await {
        Ok(records) => HistoryState {
            records,
            error: None,
        },
        Err(err) => {
            let fault = Fault::from_server_error(&err);
            tracing::error!("failed to load history: {fault}");
            HistoryState {
                records: Vec::new(),
                error: Some("Couldn't load your analysis history.".to_string()),
            }
        }
    }
}

#[component]
pub fn HistoryPanel() -> Element {
    let sessions: Signal<Option<Session>> = use_context();
    let mut history = use_resource(move || load_history(sessions()));
    let mut search = use_signal(String::new);
    let mut filter = use_signal(|| HistoryFilter::All);
    let selected = use_signal(|| None::<AnalysisRecord>);

    let state = history().unwrap_or_default();
    let needle = search().to_lowercase();
    let filtered: Vec<AnalysisRecord> = state
        .records
        .iter()
        .filter(|record| filter().matches(record))
        .filter(|record| needle.is_empty() || record.label.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let delete = move |id: String| {
        if !confirm_delete() {
            return;
        }
        let Some(session) = sessions() else { return };
        spawn(async move {
            match api::delete_analysis(session.token, id).await {
                Ok(()) => history.restart(),
                Err(err) => {
                    // Fails closed on someone else's record; nothing to retry.
                    tracing::error!("delete failed: {}", Fault::from_server_error(&err));
                }
            }
        });
    };

    rsx! {
        div { class: "history-panel",
            div { class: "history-panel__header",
                h2 { "Analysis History" }
                p { class: "card__description", "View and manage your past leaf disease analyses." }
            }

            section { class: "card history-panel__filters",
                input {
                    r#type: "search",
                    class: "history-panel__search",
                    placeholder: "Search results…",
                    value: "{search()}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "history-panel__filter",
                    onchange: move |evt| filter.set(HistoryFilter::from_value(&evt.value())),
                    option { value: "all", "All results" }
                    option { value: "healthy", "Healthy only" }
                    option { value: "diseased", "Diseased only" }
                }
            }

            if let Some(message) = state.error {
                div { class: "alert alert--error",
                    span { "{message}" }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| history.restart(),
                        "Retry"
                    }
                }
            } else if filtered.is_empty() {
                section { class: "card",
                    p { class: "card__placeholder",
                        if state.records.is_empty() {
                            "No analyses yet. Start by uploading a leaf image!"
                        } else {
                            "No analyses match your search."
                        }
                    }
                }
            } else {
                ul { class: "history-list",
                    for record in filtered.into_iter() {
                        HistoryRow {
                            key: "{record.id}",
                            record: record.clone(),
                            selected,
                            on_delete: delete,
                        }
                    }
                }
            }

            DetailModal { selected }
        }
    }
}

#[component]
fn HistoryRow(
    record: AnalysisRecord,
    selected: Signal<Option<AnalysisRecord>>,
    on_delete: EventHandler<String>,
) -> Element {
    let sessions: Option<Signal<Option<Session>>> = try_use_context();
    let healthy = record.is_healthy();
    let timestamp = format::display_timestamp(&record.created_at);
    let confidence = format::confidence_percent(record.confidence);

    let open_report = {
        let record = record.clone();
        move |_| {
            let user_label = sessions
                .as_ref()
                .and_then(|signal| signal())
                .map(|session| session.user.email)
                .unwrap_or_else(|| "Unknown User".to_string());
            report::open_analysis_report(&record, &user_label);
        }
    };

    let view = {
        let record = record.clone();
        let mut selected = selected;
        move |_| selected.set(Some(record.clone()))
    };

    let record_id = record.id.clone();

    rsx! {
        li { class: "history-list__item",
            div { class: "history-list__summary",
                span {
                    class: if healthy { "badge badge--healthy" } else { "badge badge--diseased" },
                    if healthy { "Healthy" } else { "Diseased" }
                }
                div { class: "history-list__heading",
                    span { class: "history-list__label", "{record.label}" }
                    span { class: "history-list__timestamp", "{timestamp}" }
                }
                span { class: "history-list__confidence", "{confidence}%" }
            }

            div { class: "history-list__actions",
                button { r#type: "button", class: "button button--ghost", onclick: view, "View" }
                button { r#type: "button", class: "button button--ghost", onclick: open_report, "Report" }
                button {
                    r#type: "button",
                    class: "button button--ghost button--danger",
                    onclick: move |_| on_delete.call(record_id.clone()),
                    "Delete"
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|window| {
            window
                .confirm_with_message("Are you sure you want to delete this analysis?")
                .ok()
        })
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn confirm_delete() -> bool {
    true
}
