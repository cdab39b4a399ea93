//! Card-entry form for the one-time setup payment.
//!
//! Drives an [`api::PaymentIntentCoordinator`]: the single-use intent is
//! requested when the form mounts, confirmation is submitted with the
//! user-entered card details, and card errors stay inline on the form
//! without discarding the held intent. On a successful confirmation the
//! caller navigates to the confirmation page, where reconciliation makes
//! the status authoritative.

use api::{
    CardDetails, IntentStatus, PaymentIntentCoordinator, PortalConfig, StripeProcessor,
};
use dioxus::prelude::*;

use crate::session::{use_portal, use_session};

#[component]
pub fn PaymentForm(on_success: EventHandler<()>) -> Element {
    let session = use_session();
    let portal = use_portal();
    let mut coordinator = use_signal(|| {
        PaymentIntentCoordinator::new(StripeProcessor::new(&PortalConfig::default()))
    });

    let mut number = use_signal(String::new);
    let mut exp_month = use_signal(String::new);
    let mut exp_year = use_signal(String::new);
    let mut cvc = use_signal(String::new);

    let mut error = use_signal(|| Option::<String>::None);
    let mut ready = use_signal(|| false);
    let mut processing = use_signal(|| false);
    let mut succeeded = use_signal(|| false);

    // Obtain the single-use intent on mount. The task is owned by this
    // scope, so an unmount while the request is in flight discards the
    // result instead of writing to a dead form.
    let _intent = use_resource(move || {
        let portal = portal.clone();
        async move {
            let token = session.peek().session().token.clone();
            let mut fresh = coordinator.peek().clone();
            match fresh.request_intent(&portal, token.as_deref()).await {
                Ok(()) => {
                    coordinator.set(fresh);
                    ready.set(true);
                }
                Err(err) => {
                    tracing::error!("failed to initialize payment: {err}");
                    error.set(Some(err.to_string()));
                }
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let card = CardDetails {
                number: number().trim().replace(' ', ""),
                exp_month: exp_month().trim().to_string(),
                exp_year: exp_year().trim().to_string(),
                cvc: cvc().trim().to_string(),
            };
            if card.number.is_empty()
                || card.exp_month.is_empty()
                || card.exp_year.is_empty()
                || card.cvc.is_empty()
            {
                error.set(Some("Please fill in all card fields".to_string()));
                return;
            }

            processing.set(true);
            let mut fresh = coordinator.peek().clone();
            let result = fresh.confirm(&card).await;
            coordinator.set(fresh);
            processing.set(false);

            match result {
                Ok(IntentStatus::Succeeded) => {
                    succeeded.set(true);
                    on_success.call(());
                }
                Ok(status) => {
                    error.set(Some(format!(
                        "Payment status: {status}. Please contact support."
                    )));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    let disabled = processing() || !ready() || succeeded();

    rsx! {
        form {
            onsubmit: handle_submit,
            style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 400px;",

            label {
                style: "font-weight: 600; font-size: 0.875rem;",
                "Credit or debit card"
            }
            input {
                r#type: "text",
                inputmode: "numeric",
                autocomplete: "cc-number",
                placeholder: "Card number",
                value: number(),
                oninput: move |evt: FormEvent| number.set(evt.value()),
            }

            div {
                style: "display: flex; gap: 0.5rem;",
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "MM",
                    value: exp_month(),
                    oninput: move |evt: FormEvent| exp_month.set(evt.value()),
                }
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "YYYY",
                    value: exp_year(),
                    oninput: move |evt: FormEvent| exp_year.set(evt.value()),
                }
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "CVC",
                    value: cvc(),
                    oninput: move |evt: FormEvent| cvc.set(evt.value()),
                }
            }

            if let Some(err) = error() {
                div {
                    role: "alert",
                    style: "color: #dc2626; font-size: 0.875rem;",
                    "{err}"
                }
            } else if !ready() {
                div {
                    style: "color: #787774; font-size: 0.875rem;",
                    "Initializing payment..."
                }
            }

            button {
                r#type: "submit",
                disabled: disabled,
                style: "padding: 0.75rem 1.25rem; border: none; border-radius: 4px; background: #6772e5; color: white; font-size: 1rem; cursor: pointer;",
                if processing() {
                    "Processing..."
                } else if succeeded() {
                    "Payment Successful"
                } else {
                    "Pay $100.00"
                }
            }
        }
    }
}
