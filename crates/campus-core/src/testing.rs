//! Test doubles shared by the unit tests.

use crate::session::{Navigator, Route};
use async_trait::async_trait;
use campus_http::{ApiNetwork, ApiRequest, ApiResponse, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays scripted replies in order and records what was sent.
/// Unscripted requests get a 404.
#[derive(Default)]
pub struct StubNetwork {
    replies: Mutex<VecDeque<Result<ApiResponse>>>,
    seen: Mutex<Vec<(String, ApiRequest)>>,
}

impl StubNetwork {
    pub fn push(&self, reply: Result<ApiResponse>) {
        self.replies.lock().push_back(reply);
    }

    pub fn request(&self, index: usize) -> (String, ApiRequest) {
        self.seen.lock()[index].clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.seen.lock().iter().map(|(url, _)| url.clone()).collect()
    }
}

#[async_trait]
impl ApiNetwork for StubNetwork {
    async fn fetch(&self, url: &str, req: ApiRequest) -> Result<ApiResponse> {
        self.seen.lock().push((url.to_string(), req));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(404, "")))
    }
}

pub fn json_reply(status: u16, body: serde_json::Value) -> Result<ApiResponse> {
    Ok(ApiResponse::json(status, &body))
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}
