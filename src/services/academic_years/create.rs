use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AcademicYearService, validate_year_fields};
use crate::models::academic_years::requests::CreateAcademicYearRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};

pub async fn create_academic_year(
    service: &AcademicYearService,
    mut req: CreateAcademicYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    req.name = req.name.trim().to_string();
    if let Err((code, msg)) = validate_year_fields(&req.name, req.start_date, req.end_date) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    match storage.get_academic_year_by_name(&req.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AcademicYearAlreadyExists,
                format!("Academic year '{}' already exists", req.name),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to check academic year name",
                e,
            ));
        }
    }

    match storage.create_academic_year(req).await {
        Ok(year) => {
            info!("Academic year {} created", year.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                year,
                "Academic year created successfully",
            )))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AcademicYearAlreadyExists,
                "Academic year already exists",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to create academic year",
            e,
        )),
    }
}
