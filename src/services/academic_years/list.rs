use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicYearService;
use crate::models::academic_years::requests::{AcademicYearListQuery, AcademicYearQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{normalize_search, parse_sort, storage_error_response};

pub async fn list_academic_years(
    service: &AcademicYearService,
    query: AcademicYearQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(query.sort.as_deref(), AcademicYearQueryParams::SORT_FIELDS) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = AcademicYearListQuery {
        page,
        size,
        search: normalize_search(query.search),
        is_current: query.is_current,
        sort,
    };

    match storage.list_academic_years_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Academic years retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list academic years",
            e,
        )),
    }
}

pub async fn get_academic_year(
    service: &AcademicYearService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_academic_year_by_id(id).await {
        Ok(Some(year)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            year,
            "Academic year retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AcademicYearNotFound,
            "Academic year not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get academic year",
            e,
        )),
    }
}
