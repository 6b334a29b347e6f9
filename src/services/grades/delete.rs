use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, storage_error_response};

pub async fn delete_grade(
    service: &GradeService,
    enrollment_id: i64,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_grade(enrollment_id, subject_id).await {
        Ok(Some(result)) => {
            info!(
                "Grade for enrollment {} subject {} deleted, GPA now {}",
                enrollment_id, subject_id, result.gpa
            );
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Grade deleted successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete grade",
            e,
        )),
    }
}
