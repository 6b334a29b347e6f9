use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SemesterService, check_year_and_name, validate_semester_fields};
use crate::models::semesters::requests::CreateSemesterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};

pub async fn create_semester(
    service: &SemesterService,
    mut req: CreateSemesterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    req.name = req.name.trim().to_string();
    if let Err(resp) = validate_semester_fields(&req.name, req.start_date, req.end_date) {
        return Ok(resp);
    }
    if let Err(resp) = check_year_and_name(&storage, req.academic_year_id, &req.name).await {
        return Ok(resp);
    }

    match storage.create_semester(req).await {
        Ok(semester) => {
            info!(
                "Semester {} created in academic year {}",
                semester.name, semester.academic_year_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(semester, "Semester created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SemesterAlreadyExists, "Semester already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to create semester",
            e,
        )),
    }
}
