//! Session state and the shared handle to it.

use crate::models::UserProfile;
use campus_http::{Result, TokenStore};
use parking_lot::RwLock;
use std::sync::Arc;

/// Snapshot of who is signed in.
///
/// `user` is only set after the backend accepted `token`, either through
/// login or through the current-user check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token.
    Anonymous,
    /// A token exists and the profile fetch has not finished.
    Loading,
    Authenticated,
    /// A token exists but the profile fetch failed. The token is kept until
    /// a request is rejected with 401/403 or the user logs out.
    ProfileUnavailable,
}

impl Session {
    pub fn status(&self) -> SessionStatus {
        match (&self.token, &self.user) {
            (None, _) => SessionStatus::Anonymous,
            (Some(_), Some(_)) => SessionStatus::Authenticated,
            (Some(_), None) if self.is_loading => SessionStatus::Loading,
            (Some(_), None) => SessionStatus::ProfileUnavailable,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }
}

/// Shared read/write access to the session and its persisted token.
///
/// Cloning is cheap; every clone sees the same state.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<Session>>,
    store: Arc<dyn TokenStore>,
}

impl SessionHandle {
    /// Start from whatever token the store holds.
    pub fn restore(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        let session = Session {
            is_loading: token.is_some(),
            token,
            user: None,
        };
        Self {
            state: Arc::new(RwLock::new(session)),
            store,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Persist `token` and then publish the signed-in state.
    ///
    /// Nothing changes in memory when the store refuses the token.
    pub fn sign_in(&self, token: &str, user: UserProfile) -> Result<()> {
        self.store.save(token)?;
        let mut state = self.state.write();
        state.token = Some(token.to_string());
        state.user = Some(user);
        state.is_loading = false;
        Ok(())
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    /// Record the profile returned by the current-user check for `token`.
    ///
    /// Ignored if the session moved on to another token (or none) while the
    /// check was in flight.
    pub fn profile_loaded(&self, token: &str, user: UserProfile) -> bool {
        let mut state = self.state.write();
        if state.token.as_deref() != Some(token) {
            return false;
        }
        state.user = Some(user);
        state.is_loading = false;
        true
    }

    /// Stop loading without a profile. The token stays.
    pub fn profile_failed(&self) {
        self.state.write().is_loading = false;
    }

    /// Drop the persisted token and all in-memory state.
    ///
    /// The in-memory state is cleared even when the store fails; the store
    /// error is returned afterwards.
    pub fn clear(&self) -> Result<()> {
        let removed = self.store.clear();
        *self.state.write() = Session::default();
        removed
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_http::MemoryTokenStore;

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": "u-7",
            "email": "rahim@school.test",
            "role": ["Teacher"]
        }))
        .unwrap()
    }

    #[test]
    fn test_restore_without_token_is_anonymous() {
        let handle = SessionHandle::restore(Arc::new(MemoryTokenStore::new()));
        assert_eq!(handle.status(), SessionStatus::Anonymous);
        assert!(!handle.snapshot().is_loading);
    }

    #[test]
    fn test_restore_with_token_is_loading() {
        let handle = SessionHandle::restore(Arc::new(MemoryTokenStore::with_token("abc")));
        assert_eq!(handle.status(), SessionStatus::Loading);
        assert_eq!(handle.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_profile_failure_keeps_token() {
        let store = Arc::new(MemoryTokenStore::with_token("abc"));
        let handle = SessionHandle::restore(store.clone());
        handle.profile_failed();
        assert_eq!(handle.status(), SessionStatus::ProfileUnavailable);
        assert_eq!(store.load().as_deref(), Some("abc"));
    }

    #[test]
    fn test_sign_in_then_clear() {
        let store = Arc::new(MemoryTokenStore::new());
        let handle = SessionHandle::restore(store.clone());
        handle.sign_in("abc", profile()).unwrap();
        assert!(handle.snapshot().is_authenticated());
        assert_eq!(store.load().as_deref(), Some("abc"));

        handle.clear().unwrap();
        assert_eq!(handle.snapshot(), Session::default());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_late_profile_after_sign_out_is_dropped() {
        let handle = SessionHandle::restore(Arc::new(MemoryTokenStore::with_token("abc")));
        handle.clear().unwrap();
        assert!(!handle.profile_loaded("abc", profile()));
        assert_eq!(handle.user(), None);
        assert_eq!(handle.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = SessionHandle::restore(Arc::new(MemoryTokenStore::new()));
        let other = handle.clone();
        handle.sign_in("abc", profile()).unwrap();
        assert_eq!(other.user().and_then(|u| u.email).as_deref(), Some("rahim@school.test"));
    }
}
