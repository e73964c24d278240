// In-memory backend shared by the integration and API tests
#![allow(dead_code)]

use async_trait::async_trait;
use skill_match::models::{CandidateProfile, JobPosting, Notification, SkillSet};
use skill_match::services::{CandidateStore, JobStore, NotificationSink, NotificationStore, StoreError};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryBackend {
    pub candidates: Vec<CandidateProfile>,
    pub jobs: Vec<JobPosting>,
    pub offline: bool,
    pub fail_persist_for: HashSet<String>,
    pub stored: Mutex<Vec<Notification>>,
    pub pushed: Mutex<Vec<String>>,
}

impl InMemoryBackend {
    pub fn stored_recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = self
            .stored
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.profile_id.clone())
            .collect();
        recipients.sort();
        recipients
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::ApiError("503 Service Unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CandidateStore for InMemoryBackend {
    async fn fetch_all_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        self.check_online()?;
        Ok(self.candidates.clone())
    }

    async fn fetch_candidate_skills(&self, profile_id: &str) -> Result<SkillSet, StoreError> {
        self.check_online()?;
        self.candidates
            .iter()
            .find(|c| c.profile_id == profile_id)
            .map(|c| c.skill_set())
            .ok_or_else(|| StoreError::NotFound(profile_id.to_string()))
    }
}

#[async_trait]
impl JobStore for InMemoryBackend {
    async fn fetch_open_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        self.check_online()?;
        let now = chrono::Utc::now();
        Ok(self.jobs.iter().filter(|j| j.is_open(now)).cloned().collect())
    }
}

#[async_trait]
impl NotificationSink for InMemoryBackend {
    async fn persist(&self, notification: &Notification) -> Result<(), StoreError> {
        if self.fail_persist_for.contains(&notification.profile_id) {
            return Err(StoreError::ApiError("write rejected".to_string()));
        }
        // Let other delivery tasks interleave
        tokio::task::yield_now().await;
        self.stored.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn push(&self, notification: &Notification) -> Result<(), StoreError> {
        self.pushed.lock().unwrap().push(notification.profile_id.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for InMemoryBackend {
    async fn list_for_recipient(&self, profile_id: &str) -> Result<Vec<Notification>, StoreError> {
        self.check_online()?;
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.profile_id == profile_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        let mut stored = self.stored.lock().unwrap();
        let notification = stored
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| StoreError::NotFound(notification_id.to_string()))?;
        notification.mark_read();
        Ok(())
    }
}

pub fn candidate(id: &str, skills: &[&str]) -> CandidateProfile {
    CandidateProfile {
        profile_id: id.to_string(),
        full_name: format!("Alumnus {}", id),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn job(id: &str, title: &str, skills: &[&str]) -> JobPosting {
    JobPosting {
        job_id: id.to_string(),
        title: title.to_string(),
        company_name: "IST".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        deadline_date: None,
    }
}
