use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicYearService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn set_current_academic_year(
    service: &AcademicYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.set_current_academic_year(id).await {
        Ok(Some(year)) => {
            info!("Academic year {} ({}) is now current", year.id, year.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                year,
                "Current academic year updated",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AcademicYearNotFound,
            "Academic year not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to set current academic year",
            e,
        )),
    }
}
