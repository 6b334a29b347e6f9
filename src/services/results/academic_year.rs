use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::requests::{
    AcademicYearResultListQuery, AcademicYearResultQueryParams,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{parse_sort, storage_error_response};

pub async fn list_academic_year_results(
    service: &ResultService,
    query: AcademicYearResultQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(
        query.sort.as_deref(),
        AcademicYearResultQueryParams::SORT_FIELDS,
    ) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = AcademicYearResultListQuery {
        page,
        size,
        academic_year_id: query.academic_year_id,
        student_id: query.student_id,
        sort,
    };

    match storage
        .list_academic_year_results_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Academic year results retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list academic year results",
            e,
        )),
    }
}

pub async fn get_academic_year_result(
    service: &ResultService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_academic_year_result(id).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Academic year result retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "Academic year result not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get academic year result",
            e,
        )),
    }
}
