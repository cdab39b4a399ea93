//! Session data model shared across the portal client.

use serde::{Deserialize, Serialize};

/// Backend-authoritative flag gating access to the paid workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    /// Anything the backend reports that we don't recognise. Treated the
    /// same as unpaid for gating purposes.
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user as the backend reports it at login.
///
/// Owned exclusively by [`Session`]; updates replace the whole value. The
/// JSON shape matches the backend contract and the durable `"authUser"`
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub payment_status: PaymentStatus,
}

/// The client-side session: who is logged in and whether they have paid.
///
/// `token` and `user` are set or cleared together; one without the other is
/// corrupt state and gets cleared on restore. `loaded` flips to true exactly
/// once, after the initial restore attempt, and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Identity>,
    pub loaded: bool,
}

/// Observable authentication state derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AuthenticatedUnpaid,
    AuthenticatedPaid,
}

impl Session {
    pub fn auth_state(&self) -> AuthState {
        match (&self.token, &self.user) {
            (Some(_), Some(user)) if user.payment_status == PaymentStatus::Paid => {
                AuthState::AuthenticatedPaid
            }
            (Some(_), Some(_)) => AuthState::AuthenticatedUnpaid,
            _ => AuthState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() != AuthState::Unauthenticated
    }
}
