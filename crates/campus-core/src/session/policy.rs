//! De-authentication on rejected credentials.

use crate::session::route::{Navigator, Route};
use crate::session::state::SessionHandle;
use campus_http::client::{is_access_denied_status, ResponsePolicy};
use campus_http::ApiResponse;
use std::sync::Arc;

/// On 401/403: forget the token, forget the user and go to the landing page.
///
/// Every other status is left alone.
#[derive(Clone)]
pub struct DeauthorizePolicy {
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
}

impl DeauthorizePolicy {
    pub fn new(session: SessionHandle, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl ResponsePolicy for DeauthorizePolicy {
    fn inspect(&self, response: &ApiResponse) {
        if !is_access_denied_status(response.status) {
            return;
        }

        tracing::info!("[session] status {}, signing out", response.status);
        if let Err(e) = self.session.clear() {
            tracing::error!("[session] failed to remove stored token: {}", e);
        }
        self.navigator.navigate(Route::Landing);
    }
}
