// Route exports
pub mod jobs;
pub mod notifications;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::{MatchEngine, NotificationDispatcher};
use crate::models::HealthResponse;
use crate::services::{CandidateStore, JobStore, NotificationStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<dyn CandidateStore>,
    pub jobs: Arc<dyn JobStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub engine: MatchEngine,
    pub dispatcher: NotificationDispatcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(jobs::configure)
            .configure(notifications::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
