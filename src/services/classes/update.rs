use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, is_unique_violation, storage_error_response};
use crate::utils::validate::validate_display_text;

pub async fn update_class(
    service: &ClassService,
    class_id: i64,
    mut update_data: UpdateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(name) = update_data.name.as_mut() {
        *name = name.trim().to_string();
        if let Err(e) = validate_display_text(name, 100) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid class name: {e}"),
            )));
        }

        match storage.get_class_by_name(name).await {
            Ok(Some(other)) if other.id != class_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassAlreadyExists,
                    format!("Class '{name}' already exists"),
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::BadRequest,
                    "Failed to check class name",
                    e,
                ));
            }
        }
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class.id);
            // 公开查询结果中包含班级名称
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassAlreadyExists, "Class already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Class update failed",
            e,
        )),
    }
}
