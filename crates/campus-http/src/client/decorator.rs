//! Request decoration stage.

use crate::client::utils::bearer_value;
use crate::traits::TokenStore;
use crate::types::ApiRequest;
use std::sync::Arc;

/// Mutates an outgoing request before it reaches the network.
pub trait RequestDecorator: Send + Sync + 'static {
    fn decorate(&self, request: &mut ApiRequest);
}

/// Attaches `Authorization: Bearer <token>` from the token store.
///
/// The store is read on every request, so a token revoked by an earlier
/// response is never sent again. Without a token the header is omitted and
/// the request goes out unauthenticated.
#[derive(Clone)]
pub struct BearerAuth {
    store: Arc<dyn TokenStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

impl RequestDecorator for BearerAuth {
    fn decorate(&self, request: &mut ApiRequest) {
        request
            .extra_headers
            .retain(|k, _| !k.eq_ignore_ascii_case("authorization"));

        if let Some(token) = self.store.load() {
            request.set_header("Authorization", bearer_value(&token));
        }
    }
}
