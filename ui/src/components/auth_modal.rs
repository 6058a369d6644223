use api::{ServerFnError, Session};
use dioxus::prelude::*;

use crate::core::session;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    SignIn,
    SignUp,
}

/// Modal sign-in / sign-up form. Stores the session and updates the shared
/// session signal on success.
#[component]
pub fn AuthModal(open: Signal<bool>) -> Element {
    let mut mode = use_signal(|| Mode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let session_ctx: Option<Signal<Option<Session>>> = try_use_context();

    if !open() {
        return rsx! {};
    }

    let mut close = {
        let mut open = open;
        move || {
            open.set(false);
            error.set(None);
            busy.set(false);
        }
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);

        let current_mode = mode();
        let email_value = email();
        let password_value = password();
        let name_value = name();
        let mut open = open;

        spawn(async move {
            let outcome = match current_mode {
                Mode::SignIn => api::login(email_value, password_value).await,
                Mode::SignUp => api::signup(email_value, password_value, name_value).await,
            };

            match outcome {
                Ok(new_session) => {
                    session::store_session(&new_session);
                    if let Some(mut ctx) = session_ctx {
                        ctx.set(Some(new_session));
                    }
                    open.set(false);
                }
                Err(err) => {
                    let message = match &err {
                        ServerFnError::ServerError(message) => message.clone(),
                        other => {
                            tracing::error!("auth request failed: {other}");
                            "Cannot reach the server. Please try again.".to_string()
                        }
                    };
                    error.set(Some(message));
                }
            }
            busy.set(false);
        });
    };

    let (title, submit_label, switch_label) = match mode() {
        Mode::SignIn => ("Welcome back", "Sign in", "Need an account? Sign up"),
        Mode::SignUp => ("Create your account", "Sign up", "Have an account? Sign in"),
    };

    rsx! {
        div { class: "modal-backdrop", onclick: move |_| close(),
            div { class: "modal auth-modal", onclick: move |evt| evt.stop_propagation(),
                div { class: "modal__header",
                    h2 { "{title}" }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        onclick: move |_| close(),
                        "×"
                    }
                }

                form { class: "auth-modal__form", onsubmit: submit,
                    if mode() == Mode::SignUp {
                        label { class: "auth-modal__field",
                            span { "Name" }
                            input {
                                r#type: "text",
                                required: true,
                                value: "{name()}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                        }
                    }

                    label { class: "auth-modal__field",
                        span { "Email" }
                        input {
                            r#type: "email",
                            required: true,
                            value: "{email()}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }

                    label { class: "auth-modal__field",
                        span { "Password" }
                        input {
                            r#type: "password",
                            required: true,
                            value: "{password()}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "auth-modal__error", "{message}" }
                    }

                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: busy(),
                        if busy() { "Please wait…" } else { "{submit_label}" }
                    }
                }

                button {
                    r#type: "button",
                    class: "auth-modal__switch",
                    onclick: move |_| {
                        error.set(None);
                        mode.set(match mode() {
                            Mode::SignIn => Mode::SignUp,
                            Mode::SignUp => Mode::SignIn,
                        });
                    },
                    "{switch_label}"
                }

                p { class: "auth-modal__hint", "Demo account: demo@example.com / demo123" }
            }
        }
    }
}
