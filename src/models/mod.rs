// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    unread_count, CandidateProfile, DeliveryStage, DeliveryStatus, DispatchOutcome, DispatchReport,
    JobPosting, MatchResult, Notification, Skill, SkillSet,
};
pub use requests::{JobFeedRequest, NotificationsQuery, NotifyJobRequest};
pub use responses::{
    ErrorResponse, HealthResponse, JobFeedResponse, MarkReadResponse, NotificationsResponse,
    NotifyJobResponse,
};
