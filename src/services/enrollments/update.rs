use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::enrollments::requests::UpdateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, storage_error_response};
use crate::storage::EnrollmentUpdateOutcome;

pub async fn update_enrollment(
    service: &EnrollmentService,
    id: i64,
    req: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_enrollment_class(id, req.class_id).await {
        Ok(EnrollmentUpdateOutcome::Updated(enrollment)) => {
            info!("Enrollment {} moved to class {}", id, enrollment.class_id);
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment updated successfully",
            )))
        }
        Ok(EnrollmentUpdateOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::EnrollmentNotFound, "Enrollment not found"),
        )),
        Ok(EnrollmentUpdateOutcome::ClassNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ClassNotFound, "Class not found"),
        )),
        Ok(EnrollmentUpdateOutcome::HasGrades) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EnrollmentHasGrades,
                "Enrollment already has grades, the class cannot change",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to update enrollment",
            e,
        )),
    }
}
