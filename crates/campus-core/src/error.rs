//! Error types for campus-core.

use crate::validate::ValidationErrors;
use campus_http::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The form failed client-side validation and was not sent.
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Selector has no level {0}")]
    UnknownLevel(usize),

    /// A request that needs a signed-in user was made without one.
    #[error("Not signed in")]
    NotSignedIn,
}

impl CoreError {
    /// True when the session layer has already handled this failure.
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_access_denied())
    }

    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_transport())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_passes_through() {
        let err: CoreError = ApiError::Unauthorized(403).into();
        assert!(err.is_access_denied());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_validation_errors_convert() {
        let mut errors = ValidationErrors::new();
        errors.add("class_id", "Class is required");
        let err: CoreError = errors.into();
        assert_eq!(err.to_string(), "Invalid input: class_id: Class is required");
    }

    #[test]
    fn test_not_signed_in_is_neither_denied_nor_transport() {
        let err = CoreError::NotSignedIn;
        assert!(!err.is_access_denied());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Not signed in");
    }
}
