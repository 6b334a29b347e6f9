use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{normalize_search, parse_sort, storage_error_response};

pub async fn list_classes(
    service: &ClassService,
    query: ClassQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let sort = match parse_sort(query.sort.as_deref(), ClassQueryParams::SORT_FIELDS) {
        Ok(sort) => sort,
        Err(resp) => return Ok(resp),
    };
    let (page, size) = query.pagination.normalized();

    let list_query = ClassListQuery {
        page,
        size,
        search: normalize_search(query.search),
        sort,
    };

    match storage.list_classes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list classes",
            e,
        )),
    }
}

pub async fn get_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get class",
            e,
        )),
    }
}
