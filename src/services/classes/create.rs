use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};
use crate::utils::validate::validate_display_text;

pub async fn create_class(
    service: &ClassService,
    mut class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    class_data.name = class_data.name.trim().to_string();
    if let Err(e) = validate_display_text(&class_data.name, 100) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid class name: {e}"),
        )));
    }

    match storage.get_class_by_name(&class_data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                format!("Class '{}' already exists", class_data.name),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to check class name",
                e,
            ));
        }
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} created successfully", class.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassAlreadyExists, "Class already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Class creation failed",
            e,
        )),
    }
}
