use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::requests::{EnrollmentListQuery, EnrollmentQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{normalize_search, parse_sort, storage_error_response};

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(query.sort.as_deref(), EnrollmentQueryParams::SORT_FIELDS) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = EnrollmentListQuery {
        page,
        size,
        semester_id: query.semester_id,
        class_id: query.class_id,
        student_id: query.student_id,
        search: normalize_search(query.search),
        sort,
    };

    match storage.list_enrollments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list enrollments",
            e,
        )),
    }
}

pub async fn get_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_enrollment_by_id(id).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get enrollment",
            e,
        )),
    }
}
