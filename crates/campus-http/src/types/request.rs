//! Outgoing request description.

use crate::error::Result;
use bytes::Bytes;
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;

/// A request against the backend, relative to the client's base URL.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Bytes,
    pub extra_headers: BTreeMap<String, String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            content_type: None,
            body: Bytes::new(),
            extra_headers: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[inline]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[inline]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_content_type("application/json")
            .with_body(body))
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra_headers.insert(key.into(), value.into());
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.extra_headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn authorization(&self) -> Option<&str> {
        self.header("authorization")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_builder() {
        let req = ApiRequest::get("/Enrollments/get-enrollments")
            .with_query("year_id", 3)
            .with_query("status", "Active")
            .with_header("X-Trace", "1");

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.query[0], ("year_id".to_string(), "3".to_string()));
        assert_eq!(req.header("x-trace"), Some("1"));
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let req = ApiRequest::post("/Results/add-result")
            .with_json(&serde_json::json!({ "obtained_marks": 72.5 }))
            .unwrap();

        assert_eq!(req.content_type.as_deref(), Some("application/json"));
        assert_eq!(&req.body[..], br#"{"obtained_marks":72.5}"#);
    }

    #[test]
    fn test_no_authorization_by_default() {
        assert_eq!(ApiRequest::get("/Years/get-academic-years").authorization(), None);
    }
}
