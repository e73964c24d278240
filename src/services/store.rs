//! Interfaces to the backend collections the matching core reads from and
//! writes to.
//!
//! The core never calls these directly; the route layer fetches inputs
//! through them and the dispatcher hands notifications to a sink.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CandidateProfile, JobPosting, Notification, SkillSet};

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn fetch_all_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError>;

    async fn fetch_candidate_skills(&self, profile_id: &str) -> Result<SkillSet, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Jobs whose deadline has not passed
    async fn fetch_open_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;
}

/// Destination for dispatched notifications
///
/// Each call handles exactly one notification; a failure affects only
/// that recipient.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn persist(&self, notification: &Notification) -> Result<(), StoreError>;

    async fn push(&self, notification: &Notification) -> Result<(), StoreError>;
}

/// Read side of the notifications collection
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn list_for_recipient(&self, profile_id: &str) -> Result<Vec<Notification>, StoreError>;

    async fn mark_read(&self, notification_id: &str) -> Result<(), StoreError>;
}

/// Treat a failed fetch as "no data", logging the cause
pub fn or_empty<T: Default>(result: Result<T, StoreError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to fetch {}, continuing with empty data: {}", what, e);
            T::default()
        }
    }
}
