//! Workflow entry point, reachable only for paid accounts.

use dioxus::prelude::*;
use ui::{use_session, LogoutButton};

use crate::guard::Guarded;

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Guarded {
            path: "/dashboard",
            DashboardInner {}
        }
    }
}

#[component]
fn DashboardInner() -> Element {
    let session = use_session();
    let greeting = {
        let store = session.read();
        store
            .session()
            .user
            .as_ref()
            .map(|user| {
                if user.name.is_empty() {
                    user.email.clone()
                } else {
                    user.name.clone()
                }
            })
            .unwrap_or_else(|| "User".to_string())
    };

    rsx! {
        div {
            style: "max-width: 720px; margin: 0 auto; padding: 2rem;",

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.5rem;",
                "Dashboard"
            }

            p {
                style: "margin-bottom: 1.5rem;",
                "Welcome, {greeting}!"
            }

            // Workflow steps live outside this repo; these are their entry
            // points.
            div {
                style: "display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 2rem;",
                a { href: "/intake", "Start Step 1: Seller Intake" }
                a { href: "/deal-analysis", "Go to Deal Analysis" }
            }

            LogoutButton {
                class: "logout-btn",
            }
        }
    }
}
