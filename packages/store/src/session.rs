//! # Session store — durable client-side session state
//!
//! [`SessionStore`] is the single source of truth for "who is logged in and
//! have they paid". It owns the in-memory [`Session`] plus the durable copy
//! behind a [`SessionStorage`] implementation:
//!
//! - **Web**: [`crate::LocalStorage`] over the browser's `localStorage`
//! - **Native / tests**: [`crate::MemoryStorage`]
//!
//! ## Durable layout
//!
//! Two entries under fixed keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `"authToken"` | opaque bearer token string |
//! | `"authUser"` | JSON-serialised [`Identity`] |
//!
//! Absence of either entry means "no session". Only one entry present, or an
//! unparseable `"authUser"`, is treated as corrupt: both entries are cleared
//! and the restore proceeds as unauthenticated.
//!
//! ## Error handling
//!
//! Durable-storage failures never crash the store. A failed write degrades
//! to in-memory-only state for the current tab (logged via `tracing`), and a
//! corrupted read self-heals by clearing storage.

use crate::models::{Identity, PaymentStatus, Session};

/// Durable storage key for the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Durable storage key for the JSON-serialised [`Identity`].
pub const USER_KEY: &str = "authUser";

/// Durable key-value persistence for the session.
///
/// Object-safe so [`SessionStore`] can hold a boxed platform implementation.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// A durable write or read could not be completed.
#[derive(Debug, thiserror::Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Single source of truth for the authenticated session.
///
/// All durable reads and writes go through this type; consumers only ever
/// see the in-memory [`Session`] via [`SessionStore::session`].
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    session: Session,
}

impl SessionStore {
    /// Create a store with an empty, not-yet-loaded session.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Attempt to adopt a previously saved `(token, user)` pair.
    ///
    /// Always leaves `loaded == true`. Partial or malformed durable state is
    /// cleared and the session stays unauthenticated.
    pub fn restore(&mut self) {
        let token = self.storage.get(TOKEN_KEY);
        let user_json = self.storage.get(USER_KEY);

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<Identity>(&user_json) {
                Ok(user) => {
                    self.session.token = Some(token);
                    self.session.user = Some(user);
                }
                Err(err) => {
                    tracing::warn!("corrupted stored session, clearing: {err}");
                    self.clear_durable();
                }
            },
            (None, None) => {}
            _ => {
                tracing::warn!("partial stored session (token xor user), clearing");
                self.clear_durable();
            }
        }

        self.session.loaded = true;
    }

    /// Adopt a freshly authenticated session and persist it.
    ///
    /// The in-memory session is updated even when the durable write fails;
    /// the failure is only logged (persistence degrades, this tab still
    /// works).
    pub fn login(&mut self, token: String, user: Identity) {
        let user_json = match serde_json::to_string(&user) {
            Ok(json) => json,
            Err(err) => {
                // Identity always serialises; keep the session usable anyway.
                tracing::error!("failed to serialise identity: {err}");
                self.session.token = Some(token);
                self.session.user = Some(user);
                return;
            }
        };

        self.session.token = Some(token.clone());
        self.session.user = Some(user);

        if let Err(err) = self.storage.set(TOKEN_KEY, &token) {
            tracing::warn!("failed to persist session token: {err}");
        }
        if let Err(err) = self.storage.set(USER_KEY, &user_json) {
            tracing::warn!("failed to persist session user: {err}");
        }
    }

    /// Clear the session and its durable entries. Idempotent.
    pub fn logout(&mut self) {
        self.session.token = None;
        self.session.user = None;
        self.clear_durable();
    }

    /// Replace `payment_status` on the current user, if one is present.
    ///
    /// This is the sole client-side path by which payment state moves from
    /// unpaid to paid. No-op when logged out.
    pub fn update_payment_status(&mut self, status: PaymentStatus) {
        let Some(user) = self.session.user.as_mut() else {
            return;
        };
        user.payment_status = status;

        match serde_json::to_string(user) {
            Ok(user_json) => {
                if let Err(err) = self.storage.set(USER_KEY, &user_json) {
                    tracing::warn!("failed to persist payment status: {err}");
                }
            }
            Err(err) => tracing::error!("failed to serialise identity: {err}"),
        }
    }

    fn clear_durable(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{decide, AccessDecision};
    use crate::memory::MemoryStorage;

    fn ada() -> Identity {
        Identity {
            id: "rec123".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            payment_status: PaymentStatus::Unpaid,
        }
    }

    #[test]
    fn restore_with_empty_storage_is_unauthenticated() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage);
        assert!(!store.session().loaded);

        store.restore();

        assert!(store.session().loaded);
        assert!(store.session().token.is_none());
        assert!(store.session().user.is_none());
    }

    #[test]
    fn restore_adopts_well_formed_state() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "jwt-abc").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&ada()).unwrap())
            .unwrap();

        let mut store = SessionStore::new(storage);
        store.restore();

        assert_eq!(store.session().token.as_deref(), Some("jwt-abc"));
        assert_eq!(store.session().user, Some(ada()));
        assert!(store.session().loaded);
    }

    #[test]
    fn restore_clears_malformed_user_json() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "jwt-abc").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let mut store = SessionStore::new(storage.clone());
        store.restore();

        assert!(store.session().loaded);
        assert!(store.session().token.is_none());
        assert!(store.session().user.is_none());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn restore_clears_partial_state() {
        // Token without user and user without token are both corrupt.
        for (token, user) in [
            (Some("jwt-abc"), None),
            (None, Some(serde_json::to_string(&ada()).unwrap())),
        ] {
            let storage = MemoryStorage::new();
            if let Some(token) = token {
                storage.set(TOKEN_KEY, token).unwrap();
            }
            if let Some(user) = &user {
                storage.set(USER_KEY, user).unwrap();
            }

            let mut store = SessionStore::new(storage.clone());
            store.restore();

            assert!(store.session().loaded);
            assert!(store.session().token.is_none());
            assert!(store.session().user.is_none());
            assert!(storage.get(TOKEN_KEY).is_none());
            assert!(storage.get(USER_KEY).is_none());
        }
    }

    #[test]
    fn login_then_logout_returns_to_pre_login_state() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.restore();
        let before = store.session().clone();

        store.login("jwt-abc".into(), ada());
        assert!(store.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_some());
        assert!(storage.get(USER_KEY).is_some());

        store.logout();
        assert_eq!(store.session(), &before);
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn logout_when_already_logged_out_is_a_no_op() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore();
        store.logout();
        store.logout();
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn update_payment_status_changes_only_the_status() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.restore();
        store.login("jwt-abc".into(), ada());

        store.update_payment_status(PaymentStatus::Paid);

        let user = store.session().user.as_ref().unwrap();
        assert_eq!(user.payment_status, PaymentStatus::Paid);
        assert_eq!(user.id, "rec123");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(store.session().token.as_deref(), Some("jwt-abc"));

        // Persisted identity reflects the new status.
        let stored: Identity = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn update_payment_status_without_user_is_a_no_op() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.restore();

        store.update_payment_status(PaymentStatus::Paid);

        assert!(store.session().user.is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn login_is_fail_open_when_storage_write_fails() {
        struct BrokenStorage;
        impl SessionStorage for BrokenStorage {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError("quota exceeded".into()))
            }
            fn remove(&self, _key: &str) {}
        }

        let mut store = SessionStore::new(BrokenStorage);
        store.restore();
        store.login("jwt-abc".into(), ada());

        // The current tab still has a working session.
        assert!(store.session().is_authenticated());
        assert_eq!(store.session().token.as_deref(), Some("jwt-abc"));
    }

    #[test]
    fn fresh_tab_gates_dashboard_to_login() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore();

        assert_eq!(
            decide(store.session(), "/dashboard"),
            AccessDecision::RedirectLogin
        );
    }

    #[test]
    fn stored_unpaid_session_gates_dashboard_to_payment() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "jwt-abc").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&ada()).unwrap())
            .unwrap();

        let mut store = SessionStore::new(storage);
        store.restore();

        assert_eq!(
            decide(store.session(), "/dashboard"),
            AccessDecision::RedirectPayment
        );
        assert_eq!(decide(store.session(), "/payment"), AccessDecision::Allow);
    }
}
