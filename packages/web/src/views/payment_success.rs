//! Payment confirmation page: reconciles the authoritative payment status
//! with the backend after the processor-side confirmation.
//!
//! `Pending → {Success, Error}`, both terminal for this page instance; a
//! reload re-runs the whole sequence, which is safe because the backend
//! call is idempotent and a repeat merely observes the now-stable status.

use api::reconcile_payment;
use dioxus::prelude::*;
use ui::{use_portal, use_session};

use crate::guard::Guarded;
use crate::Route;

#[derive(Clone, PartialEq)]
enum ReconcileState {
    Pending,
    Success,
    Error(String),
}

/// Confirmation page component, typically reached via processor redirect.
#[component]
pub fn PaymentSuccess() -> Element {
    rsx! {
        Guarded {
            path: "/payment-success",
            Reconciler {}
        }
    }
}

const REDIRECT_DELAY_SECS: u64 = 3;

#[component]
fn Reconciler() -> Element {
    let mut session = use_session();
    let portal = use_portal();
    let nav = use_navigator();
    let mut state = use_signal(|| ReconcileState::Pending);

    // Single reconciliation attempt per page instance; the task dies with
    // the scope, so leaving the page discards an in-flight result.
    let _reconcile = use_resource(move || {
        let portal = portal.clone();
        async move {
            let token = session.peek().session().token.clone();
            match reconcile_payment(&portal, token.as_deref()).await {
                Ok(status) => {
                    session.write().update_payment_status(status);
                    state.set(ReconcileState::Success);

                    // Let the user read the confirmation before moving on.
                    sleep_secs(REDIRECT_DELAY_SECS).await;
                    nav.replace(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::error!("payment reconciliation failed: {err}");
                    state.set(ReconcileState::Error(err.to_string()));
                }
            }
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem; text-align: center;",

            match state() {
                ReconcileState::Pending => rsx! {
                    h1 {
                        style: "font-weight: 700; font-size: 1.5rem; color: #2563eb;",
                        "Processing Payment Confirmation..."
                    }
                    p {
                        style: "margin-top: 1rem; font-size: 0.875rem; color: #787774;",
                        "Taking too long? "
                        Link { to: Route::Dashboard {}, "Go to your dashboard" }
                    }
                },
                ReconcileState::Success => rsx! {
                    h1 {
                        style: "font-weight: 700; font-size: 1.5rem; color: #16a34a;",
                        "Payment Successful!"
                    }
                    p {
                        style: "margin-top: 1rem; color: #37352f;",
                        "Your account setup is complete. You will be redirected to your dashboard shortly."
                    }
                    p {
                        style: "margin-top: 0.5rem; font-size: 0.875rem; color: #787774;",
                        "If you are not redirected, "
                        Link { to: Route::Dashboard {}, "click here" }
                        "."
                    }
                },
                ReconcileState::Error(cause) => rsx! {
                    h1 {
                        style: "font-weight: 700; font-size: 1.5rem; color: #dc2626;",
                        "Payment Confirmation Failed"
                    }
                    p {
                        style: "margin-top: 1rem; color: #37352f;",
                        "There was an issue confirming your payment status."
                    }
                    p {
                        role: "alert",
                        style: "margin-top: 0.5rem; color: #dc2626; font-size: 0.875rem;",
                        "Error: {cause}"
                    }
                    p {
                        style: "margin-top: 0.5rem; font-size: 0.875rem; color: #787774;",
                        "Please contact support, or "
                        // Plain anchor: a full reload re-runs reconciliation
                        // from Pending.
                        a { href: "/payment-success", "try again" }
                        "."
                    }
                },
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep_secs(secs: u64) {
    gloo_timers::future::sleep(std::time::Duration::from_secs(secs)).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_secs(secs: u64) {
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
}
