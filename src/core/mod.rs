// Core algorithm exports
pub mod dispatcher;
pub mod matcher;
pub mod overlap;

pub use dispatcher::{dispatch_for_new_job, NotificationDispatcher, NOTIFICATION_TITLE};
pub use matcher::{filter_relevant_candidates, filter_relevant_jobs, MatchEngine};
pub use overlap::{compute_overlap, is_relevant, normalize_skill, DEFAULT_RELEVANCE_THRESHOLD};
