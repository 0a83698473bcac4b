//! Duplicate-submission guard and user-facing outcomes.

use crate::error::CoreError;
use crate::validate::ValidationErrors;
use campus_http::ApiError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Disables a submit control while its request is in flight.
#[derive(Clone, Debug, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A permit if nothing is in flight. The control re-enables when the
    /// permit drops.
    pub fn try_begin(&self) -> Option<SubmitPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct SubmitPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// What happened to a submitted form.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Saved(Option<String>),
    /// Caught before sending; shown next to the fields.
    Invalid(ValidationErrors),
    /// `success: false` from the backend. The form keeps its values.
    Rejected(String),
    /// 401/403. The session layer already signed the user out.
    Deauthorized,
    Failed(String),
    /// Another submission was still in flight.
    Busy,
}

impl Outcome {
    pub fn from_result(result: crate::Result<Option<String>>) -> Self {
        match result {
            Ok(message) => Outcome::Saved(message),
            Err(e) => Outcome::from_error(e),
        }
    }

    pub fn from_error(error: CoreError) -> Self {
        match error {
            CoreError::Invalid(errors) => Outcome::Invalid(errors),
            CoreError::Api(ApiError::Unauthorized(_)) | CoreError::NotSignedIn => {
                Outcome::Deauthorized
            }
            CoreError::Api(ApiError::Rejected(message)) => Outcome::Rejected(message),
            CoreError::Api(ApiError::Status {
                message: Some(message),
                ..
            }) => Outcome::Rejected(message),
            CoreError::Api(ApiError::Http(detail)) => {
                tracing::debug!("transport failure: {}", detail);
                Outcome::Failed(GENERIC_FAILURE.to_string())
            }
            other => Outcome::Failed(other.to_string()),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved(_))
    }

    /// Text for a transient notification, if this outcome gets one.
    pub fn notice(&self) -> Option<String> {
        match self {
            Outcome::Saved(message) => {
                Some(message.clone().unwrap_or_else(|| "Saved successfully".to_string()))
            }
            Outcome::Rejected(message) | Outcome::Failed(message) => Some(message.clone()),
            Outcome::Busy => Some("Please wait for the current request to finish".to_string()),
            Outcome::Invalid(_) | Outcome::Deauthorized => None,
        }
    }
}

/// Run `submit` under `guard`, classifying the result.
pub async fn guarded<F>(guard: &SubmitGuard, submit: F) -> Outcome
where
    F: std::future::Future<Output = crate::Result<Option<String>>>,
{
    let Some(_permit) = guard.try_begin() else {
        return Outcome::Busy;
    };
    Outcome::from_result(submit.await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_permit_at_a_time() {
        let guard = SubmitGuard::new();
        let permit = guard.try_begin().unwrap();
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());
        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_guarded_reports_busy() {
        let guard = SubmitGuard::new();
        let _held = guard.try_begin().unwrap();
        let outcome = guarded(&guard, async { Ok(None) }).await;
        assert_eq!(outcome, Outcome::Busy);
    }

    #[tokio::test]
    async fn test_guarded_releases_after_completion() {
        let guard = SubmitGuard::new();
        let outcome = guarded(&guard, async { Ok(Some("Enrolled".to_string())) }).await;
        assert_eq!(outcome.notice().as_deref(), Some("Enrolled"));
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(
            Outcome::from_error(ApiError::Unauthorized(401).into()),
            Outcome::Deauthorized
        );
        assert_eq!(
            Outcome::from_error(ApiError::Rejected("Duplicate routine".into()).into()),
            Outcome::Rejected("Duplicate routine".into())
        );
        assert_eq!(
            Outcome::from_error(
                ApiError::Status {
                    status: 400,
                    message: Some("Section is full".into())
                }
                .into()
            ),
            Outcome::Rejected("Section is full".into())
        );
        assert_eq!(Outcome::from_error(CoreError::NotSignedIn), Outcome::Deauthorized);
        assert_eq!(
            Outcome::from_error(ApiError::Http("reset".into()).into()),
            Outcome::Failed(GENERIC_FAILURE.into())
        );
    }

    #[test]
    fn test_notices() {
        assert_eq!(Outcome::Deauthorized.notice(), None);
        assert_eq!(Outcome::Invalid(ValidationErrors::new()).notice(), None);
        assert_eq!(Outcome::Saved(None).notice().as_deref(), Some("Saved successfully"));
        assert!(Outcome::Failed("x".into()).notice().is_some());
    }
}
