use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::core::matcher::{filter_relevant_candidates, MatchEngine};
use crate::models::{
    CandidateProfile, DeliveryStage, DeliveryStatus, DispatchOutcome, DispatchReport, JobPosting,
    Notification,
};
use crate::services::NotificationSink;

pub const NOTIFICATION_TITLE: &str = "New Job Matches Your Skills!";

/// Default number of notifications delivered concurrently
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

pub fn notification_message(job: &JobPosting) -> String {
    format!("A job titled \"{}\" matches your skills.", job.title)
}

/// Build one unread notification per candidate relevant to `job`
///
/// Pure construction; nothing is persisted or pushed. All notifications in
/// the batch share a single creation timestamp.
pub fn dispatch_for_new_job<'a, I>(job: &JobPosting, candidates: I, threshold: usize) -> Vec<Notification>
where
    I: IntoIterator<Item = &'a CandidateProfile>,
{
    build_notifications(job, candidates, threshold, Utc::now())
}

/// Same as [`dispatch_for_new_job`] with an explicit batch timestamp
pub fn build_notifications<'a, I>(
    job: &JobPosting,
    candidates: I,
    threshold: usize,
    created_at: DateTime<Utc>,
) -> Vec<Notification>
where
    I: IntoIterator<Item = &'a CandidateProfile>,
{
    let job_skills = job.skill_set();
    let message = notification_message(job);
    // A profile listed twice still gets one notification per job event
    let mut notified: HashSet<String> = HashSet::new();

    filter_relevant_candidates(&job_skills, candidates, threshold)
        .filter(|(candidate, _)| notified.insert(candidate.profile_id.clone()))
        .map(|(candidate, overlap)| {
            debug!(
                "Alumnus {} matches job {} with {} shared skills",
                candidate.profile_id, job.job_id, overlap
            );
            Notification {
                id: uuid::Uuid::new_v4().to_string(),
                profile_id: candidate.profile_id.clone(),
                title: NOTIFICATION_TITLE.to_string(),
                message: message.clone(),
                timestamp: created_at,
                read: false,
            }
        })
        .collect()
}

/// Fans notifications for a new job out to a sink
///
/// Every notification is delivered by its own task (persist, then push).
/// Tasks are independent: a failure is recorded for that recipient only and
/// already delivered notifications are never rolled back.
#[derive(Clone)]
pub struct NotificationDispatcher {
    engine: MatchEngine,
    sink: Arc<dyn NotificationSink>,
    max_in_flight: usize,
    push_enabled: bool,
}

impl NotificationDispatcher {
    pub fn new(engine: MatchEngine, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            engine,
            sink,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            push_enabled: true,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn with_push(mut self, enabled: bool) -> Self {
        self.push_enabled = enabled;
        self
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Match `job` against every candidate and deliver the resulting batch
    pub async fn notify_matching_candidates(
        &self,
        job: &JobPosting,
        candidates: &[CandidateProfile],
    ) -> DispatchReport {
        let notifications = dispatch_for_new_job(job, candidates, self.engine.threshold());

        info!(
            "Job {} matched {} of {} alumni (threshold {})",
            job.job_id,
            notifications.len(),
            candidates.len(),
            self.engine.threshold()
        );

        self.deliver(&job.job_id, notifications).await
    }

    /// Deliver a batch, one task per notification
    ///
    /// Outcomes are reported in batch order regardless of completion order.
    pub async fn deliver(&self, job_id: &str, notifications: Vec<Notification>) -> DispatchReport {
        let limiter = Arc::new(Semaphore::new(self.max_in_flight));

        let tasks: Vec<_> = notifications
            .into_iter()
            .map(|notification| {
                let sink = Arc::clone(&self.sink);
                let limiter = Arc::clone(&limiter);
                let push_enabled = self.push_enabled;
                let key = (notification.id.clone(), notification.profile_id.clone());

                let handle = tokio::spawn(async move {
                    deliver_limited(&limiter, sink.as_ref(), &notification, push_enabled).await
                });

                (key, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(tasks.len());
        for ((notification_id, recipient), handle) in tasks {
            let status = handle.await.unwrap_or_else(|e| DeliveryStatus::Aborted {
                reason: format!("delivery task aborted: {}", e),
            });

            match &status {
                DeliveryStatus::Failed { stage, reason } => warn!(
                    "Notification {} for {} failed at {:?}: {}",
                    notification_id, recipient, stage, reason
                ),
                DeliveryStatus::Aborted { reason } => warn!(
                    "Notification {} for {} did not complete: {}",
                    notification_id, recipient, reason
                ),
                DeliveryStatus::Delivered => {}
            }

            outcomes.push(DispatchOutcome {
                notification_id,
                recipient,
                status,
            });
        }

        let report = DispatchReport::from_outcomes(job_id, outcomes);
        info!("Job {}: {}", job_id, report.summary());
        report
    }
}

/// Run one delivery while holding a permit from `limiter`
async fn deliver_limited(
    limiter: &Arc<Semaphore>,
    sink: &dyn NotificationSink,
    notification: &Notification,
    push_enabled: bool,
) -> DeliveryStatus {
    let _permit = match Arc::clone(limiter).acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            return DeliveryStatus::Aborted {
                reason: format!("delivery limiter unavailable: {}", e),
            }
        }
    };

    deliver_one(sink, notification, push_enabled).await
}

async fn deliver_one(
    sink: &dyn NotificationSink,
    notification: &Notification,
    push_enabled: bool,
) -> DeliveryStatus {
    if let Err(e) = sink.persist(notification).await {
        return DeliveryStatus::Failed {
            stage: DeliveryStage::Persist,
            reason: e.to_string(),
        };
    }

    if push_enabled {
        if let Err(e) = sink.push(notification).await {
            return DeliveryStatus::Failed {
                stage: DeliveryStage::Push,
                reason: e.to_string(),
            };
        }
    }

    DeliveryStatus::Delivered
}
