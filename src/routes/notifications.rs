use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    unread_count, ErrorResponse, MarkReadResponse, NotificationsQuery, NotificationsResponse,
};
use crate::routes::AppState;
use crate::services::StoreError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(list_notifications))
        .route("/notifications/{id}/read", web::post().to(mark_read));
}

/// GET /api/v1/notifications?profileId={profileId}
async fn list_notifications(
    state: web::Data<AppState>,
    query: web::Query<NotificationsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.notifications.list_for_recipient(&query.profile_id).await {
        Ok(notifications) => {
            let unread = unread_count(&notifications);
            tracing::debug!(
                "Alumnus {} has {} notifications ({} unread)",
                query.profile_id,
                notifications.len(),
                unread
            );
            HttpResponse::Ok().json(NotificationsResponse {
                notifications,
                unread_count: unread,
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch notifications for {}: {}", query.profile_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch notifications".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// POST /api/v1/notifications/{id}/read
async fn mark_read(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.notifications.mark_read(&id).await {
        Ok(()) => HttpResponse::Ok().json(MarkReadResponse { id, read: true }),
        Err(StoreError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Notification not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to mark notification {} as read: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to mark notification as read".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
