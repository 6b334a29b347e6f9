use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SemesterService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn set_current_semester(
    service: &SemesterService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.set_current_semester(id).await {
        Ok(Some(semester)) => {
            info!("Semester {} ({}) is now current", semester.id, semester.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(semester, "Current semester updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SemesterNotFound,
            "Semester not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to set current semester",
            e,
        )),
    }
}
