use api::Session;
use dioxus::prelude::*;

use crate::analysis::AnalysisPanel;
use crate::components::AuthModal;
use crate::history::HistoryPanel;
use crate::summary::SummaryPanel;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Analyze,
    Summary,
    History,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Self::Analyze => "Analyze",
            Self::Summary => "Summary",
            Self::History => "History",
        }
    }
}

const TABS: [Tab; 3] = [Tab::Analyze, Tab::Summary, Tab::History];

#[component]
pub fn Dashboard() -> Element {
    let sessions: Signal<Option<Session>> = use_context();
    let mut tab = use_signal(|| Tab::Analyze);
    let auth_open = use_signal(|| false);

    let Some(session) = sessions() else {
        let mut auth_open = auth_open;
        return rsx! {
            section { class: "page page-dashboard page-dashboard--locked",
                div { class: "card",
                    h2 { "Sign in to continue" }
                    p { class: "card__description",
                        "Your analyses are tied to your account. Sign in or create one to start."
                    }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| auth_open.set(true),
                        "Sign in"
                    }
                }
                AuthModal { open: auth_open }
            }
        };
    };

    rsx! {
        section { class: "page page-dashboard",
            div { class: "page-dashboard__welcome",
                h1 { "Welcome back, {session.user.name}" }
                p { "Analyze a new leaf or review your past results." }
            }

            nav { class: "tabs",
                for entry in TABS.iter().copied() {
                    button {
                        r#type: "button",
                        class: if tab() == entry { "tabs__tab tabs__tab--active" } else { "tabs__tab" },
                        onclick: move |_| tab.set(entry),
                        {entry.label()}
                    }
                }
            }

            match tab() {
                Tab::Analyze => rsx! { AnalysisPanel {} },
                Tab::Summary => rsx! { SummaryPanel {} },
                Tab::History => rsx! { HistoryPanel {} },
            }
        }
    }
}
