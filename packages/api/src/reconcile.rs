//! # Payment-confirmation reconciliation
//!
//! After the processor confirms a charge, the backend (not the client) is
//! the authority on payment status: it has seen the processor's webhook.
//! The confirmation page calls [`reconcile_payment`] and, on success, applies
//! the result through [`store::SessionStore::update_payment_status`], which
//! is what finally unlocks the paid workflow for the access gate.
//!
//! The backend call is idempotent and carries no intent identifier; the
//! backend derives the latest intent for the authenticated user. A page
//! refresh simply re-runs the sequence and observes the now-stable status.

use crate::client::Backend;
use crate::error::ReconcileError;
use store::PaymentStatus;

/// Ask the backend for the authoritative payment status after a
/// processor-side confirmation.
///
/// Returns `Ok(Paid)` exactly when the backend reports the account as paid;
/// any other status, a missing token, or a failed call is an error the
/// confirmation page must show rather than swallow. Silent failure here
/// risks a paid user stuck in an unpaid view.
pub async fn reconcile_payment<B: Backend>(
    backend: &B,
    token: Option<&str>,
) -> Result<PaymentStatus, ReconcileError> {
    let token = token.ok_or(ReconcileError::NotAuthenticated)?;

    let status = backend.update_payment_status(token).await?;
    match status {
        PaymentStatus::Paid => Ok(PaymentStatus::Paid),
        other => Err(ReconcileError::NotConfirmed(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::cell::Cell;
    use store::{Identity, MemoryStorage, SessionStore};

    struct StubBackend {
        status: Result<PaymentStatus, ()>,
        calls: Cell<usize>,
    }

    impl StubBackend {
        fn reporting(status: PaymentStatus) -> Self {
            Self {
                status: Ok(status),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                status: Err(()),
                calls: Cell::new(0),
            }
        }
    }

    impl Backend for StubBackend {
        async fn create_payment_intent(&self, _token: &str) -> Result<String, ApiError> {
            Err(ApiError::Backend("not under test".into()))
        }

        async fn payment_status(&self, _token: &str) -> Result<PaymentStatus, ApiError> {
            self.status
                .map_err(|_| ApiError::Backend("status lookup failed".into()))
        }

        async fn update_payment_status(&self, _token: &str) -> Result<PaymentStatus, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.status
                .map_err(|_| ApiError::Backend("status update failed".into()))
        }
    }

    fn logged_in_store(status: PaymentStatus) -> SessionStore {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore();
        store.login(
            "jwt-abc".into(),
            Identity {
                id: "rec123".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                payment_status: status,
            },
        );
        store
    }

    #[tokio::test]
    async fn missing_token_is_a_terminal_error_without_a_backend_call() {
        let backend = StubBackend::reporting(PaymentStatus::Paid);

        let result = reconcile_payment(&backend, None).await;

        assert!(matches!(result, Err(ReconcileError::NotAuthenticated)));
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn paid_status_propagates_into_the_session() {
        let backend = StubBackend::reporting(PaymentStatus::Paid);
        let mut store = logged_in_store(PaymentStatus::Unpaid);
        let token = store.session().token.clone();

        let status = reconcile_payment(&backend, token.as_deref()).await.unwrap();
        store.update_payment_status(status);

        assert_eq!(
            store.session().user.as_ref().unwrap().payment_status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn refresh_repeats_reconciliation_safely() {
        // A page refresh re-runs the whole sequence; the second run observes
        // the backend's now-stable "paid" and re-applies it harmlessly.
        let backend = StubBackend::reporting(PaymentStatus::Paid);
        let mut store = logged_in_store(PaymentStatus::Unpaid);
        let token = store.session().token.clone();

        for _ in 0..2 {
            let status = reconcile_payment(&backend, token.as_deref()).await.unwrap();
            store.update_payment_status(status);
        }

        assert_eq!(backend.calls.get(), 2);
        assert_eq!(
            store.session().user.as_ref().unwrap().payment_status,
            PaymentStatus::Paid
        );
        assert_eq!(store.session().token.as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn unpaid_report_is_not_confirmed() {
        let backend = StubBackend::reporting(PaymentStatus::Unpaid);

        let result = reconcile_payment(&backend, Some("jwt-abc")).await;

        assert!(matches!(
            result,
            Err(ReconcileError::NotConfirmed(PaymentStatus::Unpaid))
        ));
    }

    #[tokio::test]
    async fn backend_failure_surfaces_verbatim() {
        let backend = StubBackend::failing();

        let result = reconcile_payment(&backend, Some("jwt-abc")).await;

        match result {
            Err(ReconcileError::Api(ApiError::Backend(message))) => {
                assert_eq!(message, "status update failed");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
