//! Skill Match - job matching and notification service for the IST alumni job portal
//!
//! This library provides the skill-overlap matching used in both directions:
//! filtering the job feed shown to an alumnus, and deciding which alumni to
//! notify when a job is posted.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_overlap, is_relevant, MatchEngine, NotificationDispatcher};
pub use crate::models::{CandidateProfile, DispatchReport, JobPosting, Notification, SkillSet};
