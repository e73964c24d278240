use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::{CandidateProfile, JobPosting, Notification, SkillSet};
use crate::services::store::{CandidateStore, JobStore, NotificationSink, NotificationStore, StoreError};

/// Documents requested per list page
const PAGE_SIZE: usize = 1000;

/// Appwrite API client
///
/// Backs every store interface the service needs:
/// - Reading alumni profiles and their skills
/// - Reading open job postings
/// - Persisting, listing and acknowledging notifications
/// - Pushing notifications through Appwrite Messaging
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub alumni_profiles: String,
    pub jobs: String,
    pub notifications: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, StoreError> {
        let response = request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::debug!("Appwrite error for {}: {} - {}", what, status, body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
            _ => Err(StoreError::ApiError(format!("Failed to {}: {}", what, status))),
        }
    }

    /// List every document of a collection matching the given Appwrite queries
    ///
    /// Pages through the collection with `offset` until the reported `total`
    /// is reached or a page comes back empty.
    async fn list_documents(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, StoreError> {
        let mut documents = Vec::new();

        loop {
            let (page, total) = self.list_page(collection, queries, documents.len()).await?;
            let fetched = page.len();
            documents.extend(page);

            let done = match total {
                Some(total) => documents.len() >= total,
                None => fetched < PAGE_SIZE,
            };
            if done {
                break;
            }
            if fetched == 0 {
                tracing::warn!(
                    "Collection {} reported {:?} documents but listing stopped at {}",
                    collection,
                    total,
                    documents.len()
                );
                break;
            }
        }

        tracing::debug!("Listed {} documents from {}", documents.len(), collection);

        Ok(documents)
    }

    /// Fetch one page of documents along with the collection's reported total
    async fn list_page(
        &self,
        collection: &str,
        queries: &[String],
        offset: usize,
    ) -> Result<(Vec<Value>, Option<usize>), StoreError> {
        let paging = [format!("limit({})", PAGE_SIZE), format!("offset({})", offset)];
        let query_string = queries
            .iter()
            .chain(paging.iter())
            .map(|q| format!("queries[]={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.documents_url(collection), query_string);

        tracing::debug!("Listing documents from: {}", url);

        let response = self
            .send(self.client.get(&url), &format!("list {}", collection))
            .await?;
        let mut json: Value = response.json().await?;

        let total = json
            .get("total")
            .and_then(|t| t.as_u64())
            .and_then(|t| usize::try_from(t).ok());
        let documents = match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => documents,
            _ => return Err(StoreError::InvalidResponse("Missing documents array".into())),
        };

        Ok((documents, total))
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let url = format!("{}/{}", self.documents_url(collection), urlencoding::encode(id));
        let response = self
            .send(self.client.get(&url), &format!("get {}/{}", collection, id))
            .await?;
        Ok(response.json().await?)
    }

    async fn create_document(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let payload = json!({ "documentId": id, "data": data });
        self.send(
            self.client.post(self.documents_url(collection)).json(&payload),
            &format!("create {}/{}", collection, id),
        )
        .await?;
        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.documents_url(collection), urlencoding::encode(id));
        self.send(
            self.client.patch(&url).json(&json!({ "data": data })),
            &format!("update {}/{}", collection, id),
        )
        .await?;
        Ok(())
    }
}

/// Deserialize documents, skipping any that don't fit the model
fn parse_documents<T: DeserializeOwned>(documents: Vec<Value>, kind: &str) -> Vec<T> {
    let total = documents.len();
    let parsed: Vec<T> = documents
        .into_iter()
        .filter_map(|doc| {
            let data = doc.get("data").cloned().unwrap_or(doc);
            match serde_json::from_value(data) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Skipping malformed {} document: {}", kind, e);
                    None
                }
            }
        })
        .collect();

    if parsed.len() < total {
        tracing::warn!("Skipped {} of {} {} documents", total - parsed.len(), total, kind);
    }

    parsed
}

fn equal(attribute: &str, value: &str) -> String {
    format!("equal(\"{}\", [{}])", attribute, Value::String(value.to_string()))
}

#[async_trait]
impl CandidateStore for AppwriteClient {
    async fn fetch_all_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        let documents = self
            .list_documents(&self.collections.alumni_profiles, &[])
            .await?;
        let profiles: Vec<CandidateProfile> = parse_documents(documents, "alumni profile");

        tracing::debug!("Fetched {} alumni profiles", profiles.len());

        Ok(profiles)
    }

    async fn fetch_candidate_skills(&self, profile_id: &str) -> Result<SkillSet, StoreError> {
        tracing::debug!("Fetching skills for alumnus: {}", profile_id);

        let doc = self
            .get_document(&self.collections.alumni_profiles, profile_id)
            .await?;
        let data = doc.get("data").unwrap_or(&doc);

        // Profiles without a skills field simply have no skills
        let skills: Vec<String> = match data.get("skills") {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                StoreError::InvalidResponse(format!("Failed to parse skills: {}", e))
            })?,
            None => Vec::new(),
        };

        Ok(SkillSet::from_names(&skills))
    }
}

#[async_trait]
impl JobStore for AppwriteClient {
    async fn fetch_open_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let documents = self.list_documents(&self.collections.jobs, &[]).await?;
        let now = Utc::now();

        let jobs: Vec<JobPosting> = parse_documents::<JobPosting>(documents, "job")
            .into_iter()
            .filter(|job| job.is_open(now))
            .collect();

        tracing::debug!("Fetched {} open jobs", jobs.len());

        Ok(jobs)
    }
}

#[async_trait]
impl NotificationSink for AppwriteClient {
    async fn persist(&self, notification: &Notification) -> Result<(), StoreError> {
        let data = serde_json::to_value(notification)?;
        self.create_document(&self.collections.notifications, &notification.id, data)
            .await?;

        tracing::debug!(
            "Persisted notification {} for {}",
            notification.id,
            notification.profile_id
        );

        Ok(())
    }

    async fn push(&self, notification: &Notification) -> Result<(), StoreError> {
        let url = format!(
            "{}/messaging/messages/push",
            self.base_url.trim_end_matches('/')
        );
        let payload = json!({
            "messageId": notification.id,
            "title": notification.title,
            "body": notification.message,
            "users": [notification.profile_id],
        });

        self.send(
            self.client.post(&url).json(&payload),
            &format!("push notification {}", notification.id),
        )
        .await?;

        tracing::debug!("Pushed notification {} to {}", notification.id, notification.profile_id);

        Ok(())
    }
}

#[async_trait]
impl NotificationStore for AppwriteClient {
    async fn list_for_recipient(&self, profile_id: &str) -> Result<Vec<Notification>, StoreError> {
        let queries = [equal("profileID", profile_id)];
        let documents = self
            .list_documents(&self.collections.notifications, &queries)
            .await?;

        let mut notifications: Vec<Notification> = parse_documents(documents, "notification");
        notifications.retain(|n| n.profile_id == profile_id);
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(notifications)
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), StoreError> {
        self.update_document(
            &self.collections.notifications,
            notification_id,
            json!({ "read": true }),
        )
        .await?;

        tracing::debug!("Marked notification {} as read", notification_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn create_client(base_url: String) -> AppwriteClient {
        let collections = AppwriteCollections {
            alumni_profiles: "alumniProfiles".to_string(),
            jobs: "jobs".to_string(),
            notifications: "notifications".to_string(),
        };

        AppwriteClient::new(
            base_url,
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            collections,
        )
        .expect("client")
    }

    #[test]
    fn test_appwrite_client_creation() {
        let client = create_client("https://appwrite.test/v1/".to_string());

        assert_eq!(client.api_key, "test_key");
        assert_eq!(
            client.documents_url("jobs"),
            "https://appwrite.test/v1/databases/test_db/collections/jobs/documents"
        );
    }

    #[test]
    fn test_equal_query_escapes_value() {
        assert_eq!(equal("profileID", "abc"), r#"equal("profileID", ["abc"])"#);
        assert_eq!(equal("profileID", "a\"b"), r#"equal("profileID", ["a\"b"])"#);
    }

    #[tokio::test]
    async fn test_fetch_all_candidates_skips_malformed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                Matcher::Regex("^/databases/test_db/collections/alumniProfiles/documents".into()),
            )
            .match_query(Matcher::Any)
            .match_header("x-appwrite-project", "test_project")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total": 3, "documents": [
                    {"$id": "a1", "profileID": "a1", "fullName": "Ada", "skills": ["Rust", "SQL"]},
                    {"$id": "a2", "profileID": "a2", "fullName": "Bo"},
                    {"$id": "a3", "fullName": 42}
                ]}"#,
            )
            .create_async()
            .await;

        let client = create_client(server.url());
        let profiles = client.fetch_all_candidates().await.unwrap();

        mock.assert_async().await;
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].skills, vec!["Rust", "SQL"]);
        assert!(profiles[1].skills.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_candidates_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let path = "^/databases/test_db/collections/alumniProfiles/documents";
        let first = server
            .mock("GET", Matcher::Regex(path.into()))
            .match_query(Matcher::UrlEncoded("queries[]".into(), "offset(0)".into()))
            .with_status(200)
            .with_body(
                r#"{"total": 2, "documents": [
                    {"profileID": "a1", "fullName": "Ada", "skills": ["Rust"]}
                ]}"#,
            )
            .create_async()
            .await;
        let second = server
            .mock("GET", Matcher::Regex(path.into()))
            .match_query(Matcher::UrlEncoded("queries[]".into(), "offset(1)".into()))
            .with_status(200)
            .with_body(
                r#"{"total": 2, "documents": [
                    {"profileID": "a2", "fullName": "Bo", "skills": ["Go"]}
                ]}"#,
            )
            .create_async()
            .await;

        let client = create_client(server.url());
        let profiles = client.fetch_all_candidates().await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let ids: Vec<_> = profiles.iter().map(|p| p.profile_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_listing_stops_on_empty_page() {
        let mut server = mockito::Server::new_async().await;
        let path = "^/databases/test_db/collections/jobs/documents";
        server
            .mock("GET", Matcher::Regex(path.into()))
            .match_query(Matcher::UrlEncoded("queries[]".into(), "offset(0)".into()))
            .with_status(200)
            .with_body(r#"{"total": 5, "documents": [{"jobID": "j1", "skills": ["Go"]}]}"#)
            .create_async()
            .await;
        let tail = server
            .mock("GET", Matcher::Regex(path.into()))
            .match_query(Matcher::UrlEncoded("queries[]".into(), "offset(1)".into()))
            .with_status(200)
            .with_body(r#"{"total": 5, "documents": []}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(server.url());
        let jobs = client.fetch_open_jobs().await.unwrap();

        tail.assert_async().await;
        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_candidate_skills_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/alumniProfiles/documents/missing")
            .with_status(404)
            .with_body(r#"{"message": "Document not found"}"#)
            .create_async()
            .await;

        let client = create_client(server.url());
        let result = client.fetch_candidate_skills("missing").await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_open_jobs_drops_expired() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex("^/databases/test_db/collections/jobs/documents".into()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"total": 2, "documents": [
                    {"jobID": "j1", "title": "Open", "skills": ["Go"], "deadlineDate": "2999-01-01T00:00:00Z"},
                    {"jobID": "j2", "title": "Closed", "skills": ["Go"], "deadlineDate": "2000-01-01T00:00:00Z"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = create_client(server.url());
        let jobs = client.fetch_open_jobs().await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job_id, "j1");
    }

    #[tokio::test]
    async fn test_persist_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/databases/test_db/collections/notifications/documents")
            .with_status(401)
            .create_async()
            .await;

        let client = create_client(server.url());
        let notification = Notification {
            id: "n1".to_string(),
            profile_id: "a1".to_string(),
            title: "New Job Matches Your Skills!".to_string(),
            message: "A job titled \"X\" matches your skills.".to_string(),
            timestamp: Utc::now(),
            read: false,
        };

        let result = client.persist(&notification).await;

        assert!(matches!(result, Err(StoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_mark_read_patches_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/databases/test_db/collections/notifications/documents/n1")
            .match_body(Matcher::Json(serde_json::json!({ "data": { "read": true } })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = create_client(server.url());
        client.mark_read("n1").await.unwrap();

        mock.assert_async().await;
    }
}
