use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeScaleService;
use crate::models::grade_scales::responses::GradeScaleListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn list_grade_scales(
    service: &GradeScaleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_grade_scales().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeScaleListResponse { items },
            "Grade scales retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list grade scales",
            e,
        )),
    }
}

pub async fn get_grade_scale(
    service: &GradeScaleService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_grade_scale_by_id(id).await {
        Ok(Some(scale)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            scale,
            "Grade scale retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeScaleNotFound,
            "Grade scale not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to get grade scale",
            e,
        )),
    }
}
