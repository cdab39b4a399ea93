//! Setup-fee payment page.

use dioxus::prelude::*;
use ui::PaymentForm;

use crate::guard::Guarded;
use crate::Route;

/// Payment page component. Reachable once authenticated; the gate redirects
/// already-paid accounts back to the dashboard.
#[component]
pub fn Payment() -> Element {
    rsx! {
        Guarded {
            path: "/payment",
            PaymentInner {}
        }
    }
}

#[component]
fn PaymentInner() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem;",

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.5rem;",
                "Complete Your Setup Payment"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem; max-width: 400px; text-align: center;",
                "Please enter your payment details below to activate your account ($100 setup fee)."
            }

            PaymentForm {
                // Status only becomes authoritative on the confirmation
                // page, after reconciliation with the backend.
                on_success: move |_| {
                    nav.push(Route::PaymentSuccess {});
                },
            }
        }
    }
}
