use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicYearService;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_academic_year(
    service: &AcademicYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_academic_year(id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("Academic year {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Academic year deleted successfully",
            )))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::AcademicYearNotFound, "Academic year not found"),
        )),
        Ok(DeleteOutcome::HasDependents(what)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AcademicYearHasSemesters,
                format!("Academic year still has {what}, delete them first"),
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete academic year",
            e,
        )),
    }
}
