use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::{invalidate_results, storage_error_response};

pub async fn delete_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_enrollment(id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("Enrollment {} deleted", id);
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Enrollment deleted successfully",
            )))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::EnrollmentNotFound, "Enrollment not found"),
        )),
        Ok(DeleteOutcome::HasDependents(what)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EnrollmentHasGrades,
                format!("Enrollment still has {what}, delete them first"),
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete enrollment",
            e,
        )),
    }
}
