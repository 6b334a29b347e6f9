use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::requests::{ResultListQuery, ResultQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{normalize_search, parse_sort, storage_error_response};

pub async fn list_results(
    service: &ResultService,
    query: ResultQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(query.sort.as_deref(), ResultQueryParams::SORT_FIELDS) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = ResultListQuery {
        page,
        size,
        semester_id: query.semester_id,
        class_id: query.class_id,
        search: normalize_search(query.search),
        sort,
    };

    match storage.list_results_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list results",
            e,
        )),
    }
}

pub async fn get_result(
    service: &ResultService,
    enrollment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_result_by_enrollment(enrollment_id).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "No result computed for this enrollment",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get result",
            e,
        )),
    }
}
