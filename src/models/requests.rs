use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for an alumnus's filtered job feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobFeedRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
}

/// Newly created job posting that should fan out to matching alumni
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotifyJobRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "job_id", rename = "jobID")]
    pub job_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "companyName", default)]
    pub company_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "deadlineDate", default)]
    pub deadline_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<NotifyJobRequest> for crate::models::JobPosting {
    fn from(req: NotifyJobRequest) -> Self {
        Self {
            job_id: req.job_id,
            title: req.title,
            company_name: req.company_name,
            skills: req.skills,
            deadline_date: req.deadline_date,
        }
    }
}

/// Query for a recipient's notifications
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotificationsQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
}
