//! # API crate — backend client and payment flow for the portal
//!
//! Everything the portal frontend says to the outside world lives here:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`PortalClient`]: the REST client for the portal backend (login, register, payment endpoints) and the [`Backend`] seam the payment flow is generic over |
//! | [`payment`] | [`PaymentIntentCoordinator`]: obtain a single-use payment intent and drive confirmation to a terminal outcome; [`StripeProcessor`] behind the [`PaymentProcessor`] seam |
//! | [`reconcile`] | post-confirmation reconciliation of the authoritative payment status |
//! | [`config`] | backend base URL and processor publishable key |
//! | [`error`] | error taxonomy shared by the above |

pub mod client;
pub mod config;
pub mod error;
pub mod payment;
pub mod reconcile;

pub use client::{Backend, LoginResponse, PortalClient};
pub use config::PortalConfig;
pub use error::{ApiError, PaymentError, ProcessorError, ReconcileError};
pub use payment::{
    CardDetails, IntentStatus, PaymentIntent, PaymentIntentCoordinator, PaymentProcessor,
    StripeProcessor,
};
pub use reconcile::reconcile_payment;
