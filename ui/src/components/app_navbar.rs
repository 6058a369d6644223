use api::Session;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::session;

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum. The
/// closures receive the label and return a link that contains it.
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let session_ctx: Option<Signal<Option<Session>>> = try_use_context();
    let current = session_ctx.as_ref().and_then(|signal| signal());

    let sign_out = move |_| {
        let Some(mut ctx) = session_ctx else { return };
        if let Some(active) = ctx() {
            spawn(async move {
                if let Err(err) = api::logout(active.token.clone()).await {
                    tracing::warn!("logout call failed: {err}");
                }
            });
        }
        session::clear_session();
        ctx.set(None);
    };

    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|builder| {
        let home = (builder.home)("Home");
        let dashboard = (builder.dashboard)("Dashboard");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    rsx! {
        header { class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "🍃 LeafGuard AI" }
                    span { class: "navbar__brand-subtitle", "Apple leaf disease detection" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if let Some(session) = current {
                    div { class: "navbar__session",
                        span { class: "navbar__user", "{session.user.name}" }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: sign_out,
                            "Sign out"
                        }
                    }
                }
            }
        }
    }
}
