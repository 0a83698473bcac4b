//! The `{ success, message, data }` wrapper used by every backend reply.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Unwrap the payload, turning `success: false` into [`ApiError::Rejected`].
    ///
    /// A successful envelope without `data` is also an error; use
    /// [`Envelope::into_message`] for writes that return no payload.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Rejected("Response carried no data".to_string()))
    }

    /// Like [`Envelope::into_data`] but an absent list means "no rows".
    pub fn into_list<U>(self) -> Result<Vec<U>>
    where
        T: Into<Vec<U>>,
    {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        Ok(self.data.map(Into::into).unwrap_or_default())
    }

    /// Check `success` and hand back the backend's message.
    pub fn into_message(self) -> Result<Option<String>> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}
