use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::StudentService;
use crate::config::AppConfig;
use crate::errors::GradeSysError;
use crate::models::students::responses::StudentAvatarResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate_magic_bytes;

/// 头像访问路径前缀
pub const AVATAR_URL_PREFIX: &str = "/api/v1/files/avatars";

fn upload_failed(msg: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::FileUploadFailed, msg))
}

pub async fn upload_avatar(
    service: &StudentService,
    student_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    let previous = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student.avatar,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get student", e));
        }
    };

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        error!("{}", GradeSysError::file_operation(format!("{e}")));
        return Ok(upload_failed("Failed to create upload directory"));
    }

    let mut stored_name: Option<String> = None;
    let mut file_size: usize = 0;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }

        if let Some(stored) = stored_name.as_deref() {
            let _ = fs::remove_file(Path::new(upload_dir).join(stored));
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 提取扩展名并校验
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !config
            .upload
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension)
        {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                format!(
                    "File type not allowed, expected one of: {}",
                    config.upload.allowed_types.join(", ")
                ),
            )));
        }

        let file_name = format!(
            "{}-{}{}",
            chrono::Utc::now().timestamp(),
            Uuid::new_v4(),
            extension
        );
        let file_path = Path::new(upload_dir).join(&file_name);
        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                error!("{}", GradeSysError::file_operation(format!("{e}")));
                return Ok(upload_failed("Failed to create file"));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileUploadFailed,
                        format!("Failed to read upload: {e}"),
                    )));
                }
            };

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    )));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    format!("File size exceeds the limit of {max_size} bytes"),
                )));
            }
            if let Err(e) = f.write_all(&data) {
                error!("{}", GradeSysError::file_operation(format!("{e}")));
                let _ = fs::remove_file(&file_path);
                return Ok(upload_failed("Failed to write file"));
            }
        }

        if total_size == 0 {
            let _ = fs::remove_file(&file_path);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Uploaded file is empty",
            )));
        }

        file_size = total_size;
        stored_name = Some(file_name);
    }

    let Some(stored_name) = stored_name else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    match storage.set_student_avatar(student_id, &stored_name).await {
        Ok(Some(_)) => {
            if let Some(previous) = previous {
                let old_path = Path::new(upload_dir).join(&previous);
                if let Err(e) = fs::remove_file(&old_path) {
                    warn!("Failed to remove old avatar {}: {}", old_path.display(), e);
                }
            }
            info!("Avatar {} stored for student {}", stored_name, student_id);

            let response = StudentAvatarResponse {
                url: format!("{AVATAR_URL_PREFIX}/{stored_name}"),
                filename: stored_name,
                size: file_size as i64,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Avatar uploaded successfully")))
        }
        Ok(None) => {
            let _ = fs::remove_file(Path::new(upload_dir).join(&stored_name));
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(Path::new(upload_dir).join(&stored_name));
            Ok(storage_error_response(
                ErrorCode::FileUploadFailed,
                "Failed to save avatar",
                e,
            ))
        }
    }
}
