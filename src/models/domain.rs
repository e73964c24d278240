use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::overlap::normalize_skill;

/// Skill catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "skillID")]
    pub skill_id: String,
    #[serde(rename = "skillName")]
    pub skill_name: String,
}

/// Normalized set of skill names
///
/// Names are compared by their normalized key (trimmed, lowercased), so
/// `"Java"`, `"java"` and `" java "` collapse into one entry. Blank names
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    keys: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = names
            .into_iter()
            .filter_map(|name| normalize_skill(name.as_ref()))
            .collect();
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check membership by name; the name is normalized first
    pub fn contains(&self, name: &str) -> bool {
        normalize_skill(name).is_some_and(|key| self.keys.contains(&key))
    }

    /// Iterate over the normalized keys (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

/// Alumni profile as stored in the profiles collection
///
/// Only the identity and skills matter for matching; everything else the
/// portal stores on a profile is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "profileID")]
    pub profile_id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CandidateProfile {
    pub fn skill_set(&self) -> SkillSet {
        SkillSet::from_names(&self.skills)
    }
}

/// Job posting as stored in the jobs collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "companyName", default)]
    pub company_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "deadlineDate", default)]
    pub deadline_date: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn skill_set(&self) -> SkillSet {
        SkillSet::from_names(&self.skills)
    }

    /// A job without a deadline stays open indefinitely
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.deadline_date.map_or(true, |deadline| deadline >= now)
    }
}

/// Overlap between one candidate and one job. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "profileID")]
    pub profile_id: String,
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(rename = "overlapCount")]
    pub overlap_count: usize,
}

/// Notification addressed to one alumnus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "profileID")]
    pub profile_id: String,
    pub title: String,
    pub message: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Acknowledge the notification. Returns `false` if it was already read;
    /// a read notification never becomes unread again.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Which step of delivery failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStage {
    Persist,
    Push,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Failed { stage: DeliveryStage, reason: String },
    /// The delivery task ended without reporting; persistence state unknown
    Aborted { reason: String },
}

/// Per-recipient result of a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    #[serde(rename = "notificationId")]
    pub notification_id: String,
    pub recipient: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// Outcome of one job-creation fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    #[serde(rename = "jobID")]
    pub job_id: String,
    pub attempted: usize,
    pub delivered: usize,
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn from_outcomes(job_id: impl Into<String>, outcomes: Vec<DispatchOutcome>) -> Self {
        let delivered = outcomes.iter().filter(|o| o.is_delivered()).count();
        Self {
            job_id: job_id.into(),
            attempted: outcomes.len(),
            delivered,
            outcomes,
        }
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.delivered
    }

    pub fn summary(&self) -> String {
        format!("dispatched {} of {} notifications", self.delivered, self.attempted)
    }
}
