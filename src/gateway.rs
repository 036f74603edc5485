//! Remote Post Gateway — thin wrapper over the careers REST service.
//!
//! Four single-round-trip calls, no retry, no backoff. Failures are
//! surfaced as `FeedError::Gateway`; the feed state manager alone decides
//! how to present them to the user.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// Page envelope returned by `GET /careers/`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PostRecord>,
}

/// A post exactly as the remote service stores it — no client-local fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: i64,
    pub username: String,
    pub created_datetime: DateTime<Utc>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author_ip: Option<String>,
}

/// Body of `POST /careers/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub username: String,
    pub title: String,
    pub content: String,
}

/// Body of `PATCH /careers/{id}`. The service expects the full form,
/// id included, even though the id also rides in the URL.
#[derive(Debug, Clone, Serialize)]
pub struct PostPatch {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Seam between the feed state manager and the wire. Mocked in tests.
pub trait PostGateway: Send + Sync {
    fn list(&self) -> FeedResult<Vec<PostRecord>>;
    fn create(&self, post: &NewPost) -> FeedResult<PostRecord>;
    fn update(&self, patch: &PostPatch) -> FeedResult<PostRecord>;
    fn delete(&self, id: i64) -> FeedResult<()>;
}

/// ureq-backed implementation. One shared agent, global timeout.
pub struct HttpPostGateway {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpPostGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/careers/", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/careers/{}", self.base_url, id)
    }
}

impl PostGateway for HttpPostGateway {
    fn list(&self) -> FeedResult<Vec<PostRecord>> {
        let url = self.collection_url();
        let mut res = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        let page: PostPage = res
            .body_mut()
            .read_json()
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        tracing::debug!(count = page.count, fetched = page.results.len(), "Fetched post page");
        Ok(page.results)
    }

    fn create(&self, post: &NewPost) -> FeedResult<PostRecord> {
        let url = self.collection_url();
        let mut res = self
            .agent
            .post(&url)
            .send_json(post)
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        let record: PostRecord = res
            .body_mut()
            .read_json()
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        tracing::debug!(id = record.id, "Created post on server");
        Ok(record)
    }

    fn update(&self, patch: &PostPatch) -> FeedResult<PostRecord> {
        let url = self.item_url(patch.id);
        let mut res = self
            .agent
            .patch(&url)
            .send_json(patch)
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        let record: PostRecord = res
            .body_mut()
            .read_json()
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        tracing::debug!(id = record.id, "Patched post on server");
        Ok(record)
    }

    fn delete(&self, id: i64) -> FeedResult<()> {
        let url = self.item_url(id);
        self.agent
            .delete(&url)
            .call()
            .map_err(|e| FeedError::Gateway(e.to_string()))?;
        tracing::debug!(id, "Deleted post on server");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let gw = HttpPostGateway::new("https://dev.codeleap.co.uk/", Duration::from_secs(1));
        assert_eq!(gw.collection_url(), "https://dev.codeleap.co.uk/careers/");
        assert_eq!(gw.item_url(42), "https://dev.codeleap.co.uk/careers/42");
    }

    #[test]
    fn test_page_envelope_deserializes() {
        let json = r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "id": 7,
                "username": "ana",
                "created_datetime": "2026-01-01T00:00:00Z",
                "title": "Hi",
                "content": "Body",
                "author_ip": "10.0.0.1"
            }]
        }"#;
        let page: PostPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        assert!(page.next.is_none());
        assert_eq!(page.results[0].id, 7);
        assert_eq!(page.results[0].author_ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_record_without_author_ip() {
        let json = r#"{
            "id": 3,
            "username": "bo",
            "created_datetime": "2026-01-01T00:00:00Z",
            "title": "T",
            "content": "C"
        }"#;
        let record: PostRecord = serde_json::from_str(json).unwrap();
        assert!(record.author_ip.is_none());
    }

    #[test]
    fn test_new_post_wire_shape() {
        let body = NewPost {
            username: "ana".into(),
            title: "T".into(),
            content: "C".into(),
        };
        let v: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(v["username"], "ana");
        // No client-local fields leak onto the wire
        assert!(v.get("likes").is_none());
        assert!(v.get("comments").is_none());
    }

    #[test]
    fn test_patch_wire_shape_includes_id() {
        let patch = PostPatch {
            id: 5,
            title: "T".into(),
            content: "C".into(),
        };
        let v: serde_json::Value = serde_json::to_value(&patch).unwrap();
        assert_eq!(v["id"], 5);
        assert_eq!(v["title"], "T");
        assert_eq!(v["content"], "C");
    }
}
