use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SemesterService, check_year_and_name, validate_semester_fields};
use crate::models::enrollments::requests::EnrollmentListQuery;
use crate::models::semesters::requests::UpdateSemesterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, is_unique_violation, storage_error_response};

pub async fn update_semester(
    service: &SemesterService,
    id: i64,
    mut update: UpdateSemesterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_semester_by_id(id).await {
        Ok(Some(semester)) => semester,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SemesterNotFound,
                "Semester not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to get semester",
                e,
            ));
        }
    };

    update.name = update.name.map(|n| n.trim().to_string());

    let name = update.name.clone().unwrap_or_else(|| existing.name.clone());
    let academic_year_id = update.academic_year_id.unwrap_or(existing.academic_year_id);
    let start_date = update.start_date.unwrap_or(existing.start_date);
    let end_date = update.end_date.unwrap_or(existing.end_date);

    if let Err(resp) = validate_semester_fields(&name, start_date, end_date) {
        return Ok(resp);
    }

    let year_changed = academic_year_id != existing.academic_year_id;
    if (year_changed || name != existing.name)
        && let Err(resp) = check_year_and_name(&storage, academic_year_id, &name).await
    {
        return Ok(resp);
    }

    // 已有选课的学期不能移到其他学年，否则学年结果会失真
    if year_changed {
        let probe = EnrollmentListQuery {
            page: 1,
            size: 1,
            semester_id: Some(id),
            ..Default::default()
        };
        match storage.list_enrollments_with_pagination(probe).await {
            Ok(list) if list.pagination.total > 0 => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SemesterHasEnrollments,
                    "Semester has enrollments and cannot move to another academic year",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::BadRequest,
                    "Failed to check semester enrollments",
                    e,
                ));
            }
        }
    }

    match storage.update_semester(id, update).await {
        Ok(Some(semester)) => {
            info!("Semester {} updated", semester.id);
            invalidate_results(request).await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(semester, "Semester updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SemesterNotFound,
            "Semester not found",
        ))),
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SemesterAlreadyExists, "Semester already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to update semester",
            e,
        )),
    }
}
