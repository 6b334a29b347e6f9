use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SemesterService;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_semester(
    service: &SemesterService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_semester(id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("Semester {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Semester deleted successfully")))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SemesterNotFound, "Semester not found"),
        )),
        Ok(DeleteOutcome::HasDependents(what)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::SemesterHasEnrollments,
                format!("Semester still has {what}, delete them first"),
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete semester",
            e,
        )),
    }
}
