//! # Access gate — the routing decision function
//!
//! A pure, total function from `(Session, requested path)` to an
//! [`AccessDecision`]. Every route guard in the app delegates here instead of
//! re-checking token/paid state ad hoc, so there is exactly one place where
//! the paid-workflow gating lives.
//!
//! Callers must not consult the gate before `Session::loaded` is true; the
//! guard renders a neutral pending view until then so an in-flight restore
//! never flashes an unauthenticated redirect.

use crate::models::{AuthState, Session};

/// Route partition the gate decides over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login and registration; only for the not-yet-authenticated.
    Public,
    /// The payment and payment-confirmation pages; reachable once
    /// authenticated regardless of paid status.
    PaymentRequired,
    /// The main workflow. Unknown paths fall back here too.
    PaidOnly,
}

/// Outcome of a navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectLogin,
    RedirectPayment,
    RedirectDashboard,
}

/// Partition a requested path into its route class.
pub fn classify(path: &str) -> RouteClass {
    let path = path.trim_end_matches('/');
    match path {
        "/login" | "/register" => RouteClass::Public,
        "/payment" | "/payment-success" => RouteClass::PaymentRequired,
        _ => RouteClass::PaidOnly,
    }
}

/// Decide whether `path` may be shown for the given session.
pub fn decide(session: &Session, path: &str) -> AccessDecision {
    use AccessDecision::*;
    use AuthState::*;
    use RouteClass::*;

    match (classify(path), session.auth_state()) {
        (Public, Unauthenticated) => Allow,
        // Already signed in; the login/register pages have nothing to offer.
        (Public, AuthenticatedUnpaid | AuthenticatedPaid) => RedirectDashboard,

        (PaymentRequired, Unauthenticated) => RedirectLogin,
        (PaymentRequired, AuthenticatedUnpaid) => Allow,
        // Setup fee already satisfied.
        (PaymentRequired, AuthenticatedPaid) => RedirectDashboard,

        (PaidOnly, Unauthenticated) => RedirectLogin,
        (PaidOnly, AuthenticatedUnpaid) => RedirectPayment,
        (PaidOnly, AuthenticatedPaid) => Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, PaymentStatus};

    fn session(state: AuthState) -> Session {
        let (token, status) = match state {
            AuthState::Unauthenticated => (None, None),
            AuthState::AuthenticatedUnpaid => (Some("jwt"), Some(PaymentStatus::Unpaid)),
            AuthState::AuthenticatedPaid => (Some("jwt"), Some(PaymentStatus::Paid)),
        };
        Session {
            token: token.map(String::from),
            user: status.map(|payment_status| Identity {
                id: "rec123".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                payment_status,
            }),
            loaded: true,
        }
    }

    #[test]
    fn classification() {
        assert_eq!(classify("/login"), RouteClass::Public);
        assert_eq!(classify("/register"), RouteClass::Public);
        assert_eq!(classify("/payment"), RouteClass::PaymentRequired);
        assert_eq!(classify("/payment-success"), RouteClass::PaymentRequired);
        assert_eq!(classify("/dashboard"), RouteClass::PaidOnly);
        assert_eq!(classify("/dashboard/"), RouteClass::PaidOnly);
        assert_eq!(classify("/no-such-page"), RouteClass::PaidOnly);
        assert_eq!(classify("/"), RouteClass::PaidOnly);
    }

    /// The full decision table: every auth state against every route class,
    /// twelve combinations (unknown paths exercise the PaidOnly fallback).
    #[test]
    fn decision_table() {
        use AccessDecision::*;
        use AuthState::*;

        let cases = [
            // (auth state, path, expected)
            (Unauthenticated, "/login", Allow),
            (AuthenticatedUnpaid, "/login", RedirectDashboard),
            (AuthenticatedPaid, "/login", RedirectDashboard),
            (Unauthenticated, "/payment", RedirectLogin),
            (AuthenticatedUnpaid, "/payment", Allow),
            (AuthenticatedPaid, "/payment", RedirectDashboard),
            (Unauthenticated, "/dashboard", RedirectLogin),
            (AuthenticatedUnpaid, "/dashboard", RedirectPayment),
            (AuthenticatedPaid, "/dashboard", Allow),
            (Unauthenticated, "/no-such-page", RedirectLogin),
            (AuthenticatedUnpaid, "/no-such-page", RedirectPayment),
            (AuthenticatedPaid, "/no-such-page", Allow),
        ];

        for (state, path, expected) in cases {
            assert_eq!(
                decide(&session(state), path),
                expected,
                "state {state:?} at {path}"
            );
        }
    }

    #[test]
    fn confirmation_page_follows_payment_class() {
        assert_eq!(
            decide(&session(AuthState::Unauthenticated), "/payment-success"),
            AccessDecision::RedirectLogin
        );
        assert_eq!(
            decide(&session(AuthState::AuthenticatedUnpaid), "/payment-success"),
            AccessDecision::Allow
        );
    }
}
