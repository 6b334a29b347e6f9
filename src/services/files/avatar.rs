use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::Path;
use tracing::{debug, error};

use super::FileService;
use crate::config::AppConfig;
use crate::errors::GradeSysError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::image_mime_type;
use crate::utils::file_name::validate_file_name;

pub async fn serve_avatar(
    _service: &FileService,
    _request: &HttpRequest,
    filename: String,
) -> ActixResult<HttpResponse> {
    // 路径参数已由提取器校验，这里再做一次防止内部调用绕过
    if let Err(reason) = validate_file_name(&filename) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNameInvalid,
            format!("Invalid file name: {reason}"),
        )));
    }

    let extension = Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    let config = AppConfig::get();
    if !config
        .upload
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "Not an avatar file",
        )));
    }

    let file_path = Path::new(&config.upload.dir).join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(buf) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, image_mime_type(&extension)))
            .insert_header((header::CACHE_CONTROL, "private, max-age=86400"))
            .body(buf)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Avatar {} not found", filename);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )))
        }
        Err(e) => {
            error!("{}", GradeSysError::file_operation(format!("{e}")));
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            )
        }
    }
}
