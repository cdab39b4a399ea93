//! Registration page view with name/email/password form.

use dioxus::prelude::*;
use ui::use_portal;

use crate::guard::Guarded;
use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    rsx! {
        Guarded {
            path: "/register",
            RegisterForm {}
        }
    }
}

#[component]
fn RegisterForm() -> Element {
    let portal = use_portal();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut message = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let portal = portal.clone();
        spawn(async move {
            error.set(None);
            message.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != cp {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            match portal.register(&n, &e, &p).await {
                Ok(_user_id) => {
                    loading.set(false);
                    message.set(Some(
                        "Registration successful! You can log in now.".to_string(),
                    ));
                    name.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    confirm_password.set(String::new());
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
                "Register"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Create your Sava Home Consultants account."
            }

            form {
                onsubmit: handle_register,
                style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px;",

                if let Some(err) = error() {
                    div {
                        role: "alert",
                        style: "padding: 0.625rem; border: 1px solid #fecaca; border-radius: 4px; color: #dc2626; font-size: 0.8125rem;",
                        "{err}"
                    }
                }

                if let Some(msg) = message() {
                    div {
                        style: "padding: 0.625rem; border: 1px solid #bbf7d0; border-radius: 4px; color: #16a34a; font-size: 0.8125rem;",
                        "{msg}"
                    }
                }

                input {
                    r#type: "text",
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
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

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Registering..." } else { "Register" }
                }
            }

            p {
                style: "margin-top: 1.5rem; font-size: 0.875rem;",
                "Already have an account? "
                Link { to: Route::Login {}, "Login here" }
            }
        }
    }
}
