use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeScaleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_grade_scale(
    service: &GradeScaleService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 已有成绩保留原等级，重算学期时才会暴露新的缺口
    match storage.delete_grade_scale(id).await {
        Ok(true) => {
            info!("Grade scale {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Grade scale deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeScaleNotFound,
            "Grade scale not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete grade scale",
            e,
        )),
    }
}
