use serde::{Deserialize, Serialize};
use crate::models::domain::{DispatchReport, JobPosting, Notification};

/// Response for the job feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFeedResponse {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    pub jobs: Vec<JobPosting>,
    /// Number of jobs in `jobs`
    #[serde(rename = "totalJobs")]
    pub total_jobs: usize,
    /// Open postings the feed was matched against
    #[serde(rename = "openJobs", default)]
    pub open_jobs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobFeedResponse {
    pub fn empty(profile_id: &str, message: &str) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            jobs: vec![],
            total_jobs: 0,
            open_jobs: 0,
            message: Some(message.to_string()),
        }
    }
}

/// Response for the job notification fan-out endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyJobResponse {
    #[serde(flatten)]
    pub report: DispatchReport,
    pub summary: String,
}

/// Notifications for one recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    #[serde(rename = "unreadCount")]
    pub unread_count: usize,
}

/// Acknowledgement of a mark-as-read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub id: String,
    pub read: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
