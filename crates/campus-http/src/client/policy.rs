//! Response inspection stage.

use crate::types::ApiResponse;

/// Observes every response that arrived, before the client maps it to a
/// result.
///
/// Policies run synchronously and in registration order. They see success
/// and failure responses alike and decide for themselves which statuses
/// matter; the response itself is never altered.
pub trait ResponsePolicy: Send + Sync + 'static {
    fn inspect(&self, response: &ApiResponse);
}
