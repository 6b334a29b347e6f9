use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::models::semesters::requests::{SemesterListQuery, SemesterQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{normalize_search, parse_sort, storage_error_response};

pub async fn list_semesters(
    service: &SemesterService,
    query: SemesterQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(query.sort.as_deref(), SemesterQueryParams::SORT_FIELDS) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = SemesterListQuery {
        page,
        size,
        academic_year_id: query.academic_year_id,
        search: normalize_search(query.search),
        is_current: query.is_current,
        sort,
    };

    match storage.list_semesters_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Semesters retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list semesters",
            e,
        )),
    }
}

pub async fn get_semester(
    service: &SemesterService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_semester_by_id(id).await {
        Ok(Some(semester)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            semester,
            "Semester retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SemesterNotFound,
            "Semester not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get semester",
            e,
        )),
    }
}
