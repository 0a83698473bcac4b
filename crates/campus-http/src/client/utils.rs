//! Utility functions for the backend HTTP client.

use crate::error::{ApiError, Result};

pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Value for the `Authorization` header.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Join `base` and `path`, then append `query` pairs percent-encoded.
pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> Result<String> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url =
        url::Url::parse(&joined).map_err(|e| ApiError::Config(format!("{}: {}", joined, e)))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    Ok(url.into())
}
