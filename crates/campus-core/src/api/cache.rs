//! Per-screen cache of reference lists.

use crate::api::school::SchoolApi;
use crate::error::Result;
use crate::models::*;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Fetches each reference list at most once.
///
/// A failed fetch leaves the slot empty, so the next call tries again.
/// Create one per screen; nothing is ever invalidated.
pub struct ReferenceCache {
    api: SchoolApi,
    years: OnceCell<Arc<[AcademicYear]>>,
    departments: OnceCell<Arc<[Department]>>,
    classes: OnceCell<Arc<[SchoolClass]>>,
    sections: OnceCell<Arc<[Section]>>,
    subjects: OnceCell<Arc<[Subject]>>,
    teachers: OnceCell<Arc<[Teacher]>>,
    exam_types: OnceCell<Arc<[ExamType]>>,
    exam_slots: OnceCell<Arc<[ExamSlot]>>,
    days: OnceCell<Arc<[WeekDay]>>,
    slots: OnceCell<Arc<[Slot]>>,
}

async fn cached<T, F, Fut>(cell: &OnceCell<Arc<[T]>>, fetch: F) -> Result<Arc<[T]>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    cell.get_or_try_init(|| async move { fetch().await.map(Arc::from) })
        .await
        .map(Arc::clone)
}

impl ReferenceCache {
    pub fn new(api: SchoolApi) -> Self {
        Self {
            api,
            years: OnceCell::new(),
            departments: OnceCell::new(),
            classes: OnceCell::new(),
            sections: OnceCell::new(),
            subjects: OnceCell::new(),
            teachers: OnceCell::new(),
            exam_types: OnceCell::new(),
            exam_slots: OnceCell::new(),
            days: OnceCell::new(),
            slots: OnceCell::new(),
        }
    }

    pub fn api(&self) -> &SchoolApi {
        &self.api
    }

    pub async fn years(&self) -> Result<Arc<[AcademicYear]>> {
        cached(&self.years, || self.api.years()).await
    }

    pub async fn departments(&self) -> Result<Arc<[Department]>> {
        cached(&self.departments, || self.api.departments()).await
    }

    pub async fn classes(&self) -> Result<Arc<[SchoolClass]>> {
        cached(&self.classes, || self.api.classes()).await
    }

    pub async fn sections(&self) -> Result<Arc<[Section]>> {
        cached(&self.sections, || self.api.sections()).await
    }

    pub async fn subjects(&self) -> Result<Arc<[Subject]>> {
        cached(&self.subjects, || self.api.subjects()).await
    }

    pub async fn teachers(&self) -> Result<Arc<[Teacher]>> {
        cached(&self.teachers, || self.api.teachers()).await
    }

    pub async fn exam_types(&self) -> Result<Arc<[ExamType]>> {
        cached(&self.exam_types, || self.api.exam_types()).await
    }

    pub async fn exam_slots(&self) -> Result<Arc<[ExamSlot]>> {
        cached(&self.exam_slots, || self.api.exam_slots()).await
    }

    pub async fn days(&self) -> Result<Arc<[WeekDay]>> {
        cached(&self.days, || self.api.days()).await
    }

    pub async fn slots(&self) -> Result<Arc<[Slot]>> {
        cached(&self.slots, || self.api.slots()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{json_reply, StubNetwork};
    use campus_http::{ApiClient, ClientConfig};
    use serde_json::json;

    fn cache(network: Arc<StubNetwork>) -> ReferenceCache {
        let client = ApiClient::with_network(network, ClientConfig::with_base_url("http://backend/api"));
        ReferenceCache::new(SchoolApi::new(client.clone(), client))
    }

    #[tokio::test]
    async fn test_each_list_fetched_once() {
        let network = Arc::new(StubNetwork::default());
        network.push(json_reply(
            200,
            json!({ "success": true, "data": [{ "class_id": 9, "class_name": "Nine" }] }),
        ));
        let cache = cache(network.clone());

        let first = cache.classes().await.unwrap();
        let second = cache.classes().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(network.request_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let network = Arc::new(StubNetwork::default());
        network.push(json_reply(500, json!({ "success": false })));
        network.push(json_reply(200, json!({ "success": true, "data": [{ "day_id": 1, "day_name": "Sunday" }] })));
        let cache = cache(network.clone());

        assert!(cache.days().await.is_err());
        let days = cache.days().await.unwrap();

        assert_eq!(days[0].name, "Sunday");
        assert_eq!(network.request_count(), 2);
    }
}
