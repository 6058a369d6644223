use api::Session;
use dioxus::prelude::*;

use crate::components::AuthModal;

#[component]
pub fn Home() -> Element {
    let sessions: Option<Signal<Option<Session>>> = try_use_context();
    let signed_in = sessions.as_ref().and_then(|signal| signal()).is_some();
    let mut auth_open = use_signal(|| false);

    rsx! {
        section { class: "page page-home",
            div { class: "page-home__hero",
                h1 { "Detect apple leaf diseases in seconds" }
                p { class: "page-home__tagline",
                    "Upload a photo of an apple leaf and get an instant health verdict "
                    "with treatment recommendations."
                }
                if signed_in {
                    p { class: "page-home__cta",
                        "You're signed in. Head to the dashboard to analyze a leaf."
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| auth_open.set(true),
                        "Get Started"
                    }
                    p { class: "page-home__hint",
                        "Demo account: demo@example.com / demo123"
                    }
                }
            }

            ul { class: "page-home__features",
                li {
                    h3 { "Instant analysis" }
                    p { "Results in moments, with a confidence score for every verdict." }
                }
                li {
                    h3 { "Actionable advice" }
                    p { "Each diseased verdict comes with concrete treatment steps." }
                }
                li {
                    h3 { "Track your orchard" }
                    p { "Every analysis is saved so you can spot trends over time." }
                }
            }

            AuthModal { open: auth_open }
        }
    }
}
