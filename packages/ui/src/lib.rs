//! This crate contains the shared UI for the portal: the session context
//! provider and the payment form.

mod session;
pub use session::{use_portal, use_session, LogoutButton, SessionProvider};

mod payment_form;
pub use payment_form::PaymentForm;
