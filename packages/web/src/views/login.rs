//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::{use_portal, use_session};

use crate::guard::Guarded;
use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    rsx! {
        Guarded {
            path: "/login",
            LoginForm {}
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let mut session = use_session();
    let portal = use_portal();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let portal = portal.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();

            if e.is_empty() {
                error.set(Some("Please enter your email".to_string()));
                return;
            }
            if p.is_empty() {
                error.set(Some("Please enter your password".to_string()));
                return;
            }

            loading.set(true);
            match portal.login(&e, &p).await {
                Ok(response) => {
                    let (token, user) = response.into_session(&e);
                    session.write().login(token, user);
                    // The gate bounces unpaid accounts to /payment from here.
                    nav.replace(Route::Dashboard {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem;",

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.75rem;",
                "Login"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Access your Sava Home Consultants account."
            }

            form {
                onsubmit: handle_login,
                style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px;",

                if let Some(err) = error() {
                    div {
                        role: "alert",
                        style: "padding: 0.625rem; border: 1px solid #fecaca; border-radius: 4px; color: #dc2626; font-size: 0.8125rem;",
                        "{err}"
                    }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Login" }
                }
            }

            p {
                style: "margin-top: 1.5rem; font-size: 0.875rem;",
                "Don't have an account? "
                Link { to: Route::Register {}, "Register here" }
            }
        }
    }
}
