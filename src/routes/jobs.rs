use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, JobFeedRequest, JobFeedResponse, JobPosting, NotifyJobRequest, NotifyJobResponse,
};
use crate::routes::AppState;
use crate::services::or_empty;

const NO_SKILLS: &str = "No skills found for the user.";
const FETCH_FAILED: &str = "Error fetching matching jobs";

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/jobs/feed", web::post().to(job_feed))
        .route("/jobs/notify", web::post().to(notify_job));
}

/// Filtered job feed endpoint
///
/// POST /api/v1/jobs/feed
///
/// Request body:
/// ```json
/// { "profileId": "string" }
/// ```
///
/// Unavailable skills or jobs produce an empty feed rather than an error.
/// `totalJobs` counts the matched jobs, `openJobs` every open posting.
async fn job_feed(state: web::Data<AppState>, req: web::Json<JobFeedRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let profile_id = &req.profile_id;
    tracing::info!("Building job feed for alumnus: {}", profile_id);

    let skills = match state.candidates.fetch_candidate_skills(profile_id).await {
        Ok(skills) => skills,
        Err(e) => {
            tracing::warn!("Failed to fetch skills for alumnus {}: {}", profile_id, e);
            return HttpResponse::Ok().json(JobFeedResponse::empty(profile_id, FETCH_FAILED));
        }
    };

    if skills.is_empty() {
        tracing::info!("No skills found for alumnus {}", profile_id);
        return HttpResponse::Ok().json(JobFeedResponse::empty(profile_id, NO_SKILLS));
    }

    let open_jobs = match state.jobs.fetch_open_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::warn!("Failed to fetch open jobs: {}", e);
            return HttpResponse::Ok().json(JobFeedResponse::empty(profile_id, FETCH_FAILED));
        }
    };

    let jobs: Vec<JobPosting> = state
        .engine
        .relevant_jobs(&skills, &open_jobs)
        .cloned()
        .collect();

    tracing::info!(
        "Returning {} matching jobs for alumnus {} (from {} open jobs)",
        jobs.len(),
        profile_id,
        open_jobs.len()
    );

    HttpResponse::Ok().json(JobFeedResponse {
        profile_id: profile_id.clone(),
        message: Some(format!("Found {} matching jobs", jobs.len())),
        total_jobs: jobs.len(),
        open_jobs: open_jobs.len(),
        jobs,
    })
}

/// Job notification fan-out endpoint
///
/// POST /api/v1/jobs/notify
///
/// Called once a job posting has been created. Every alumnus whose skills
/// overlap the job's by at least the configured threshold gets one
/// notification; per-recipient failures are reported in the body.
async fn notify_job(state: web::Data<AppState>, req: web::Json<NotifyJobRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let job: JobPosting = req.into_inner().into();
    tracing::info!("Dispatching notifications for new job: {} ({})", job.job_id, job.title);

    let candidates = or_empty(state.candidates.fetch_all_candidates().await, "alumni profiles");

    let report = state
        .dispatcher
        .notify_matching_candidates(&job, &candidates)
        .await;

    HttpResponse::Ok().json(NotifyJobResponse {
        summary: report.summary(),
        report,
    })
}
