//! Error taxonomy for backend and processor interactions.
//!
//! Restore-time failures are recovered locally by the session store; these
//! errors cover the flows that must be surfaced to the user instead:
//! payment setup, confirmation, and reconciliation.

use store::PaymentStatus;

/// A backend request failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No token was available, or the backend rejected the one we sent.
    /// Surfaced as "please log in again".
    #[error("not authenticated, please log in again")]
    Auth,

    /// Transport-level failure. User-facing retry message, no automatic
    /// retry.
    #[error("could not reach the server: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with something we could not use.
    #[error("{0}")]
    Backend(String),
}

/// A payment confirmation could not be carried out.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// No confirmable intent is held: either none was requested yet, or the
    /// held one already succeeded (at most one successful confirmation per
    /// intent).
    #[error("payment cannot be processed yet, please refresh and try again")]
    NotReady,

    /// User-correctable card problem. Rendered inline on the form; the held
    /// intent stays valid for another attempt.
    #[error("{0}")]
    Card(String),

    /// Anything else from the processor. Retry guidance.
    #[error("an unexpected error occurred during payment: {0}")]
    Unexpected(String),
}

/// The processor rejected or failed a confirmation call.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("{0}")]
    Card(String),

    #[error("could not reach the payment processor: {0}")]
    Network(#[from] reqwest::Error),

    #[error("payment processor error: {0}")]
    Other(String),
}

/// Post-confirmation reconciliation failed; the confirmation page shows the
/// cause and stays put.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("cannot reconcile without authentication")]
    NotAuthenticated,

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend answered but did not report the account as paid.
    #[error("backend did not confirm the payment (status: {0})")]
    NotConfirmed(PaymentStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_auth_message_is_exact() {
        assert_eq!(
            ReconcileError::NotAuthenticated.to_string(),
            "cannot reconcile without authentication"
        );
    }

    #[test]
    fn not_confirmed_names_the_status() {
        let err = ReconcileError::NotConfirmed(PaymentStatus::Unpaid);
        assert!(err.to_string().contains("unpaid"));
    }
}
