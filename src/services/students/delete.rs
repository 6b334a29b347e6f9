use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::{info, warn};

use super::StudentService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 删除成功后再清理头像文件
    let avatar = match storage.get_student_by_id(id).await {
        Ok(Some(student)) => student.avatar,
        Ok(None) => None,
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get student", e));
        }
    };

    match storage.delete_student(id).await {
        Ok(DeleteOutcome::Deleted) => {
            if let Some(avatar) = avatar {
                let path = Path::new(&AppConfig::get().upload.dir).join(&avatar);
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!("Failed to remove avatar {}: {}", path.display(), e);
                }
            }
            info!("Student {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found"),
        )),
        Ok(DeleteOutcome::HasDependents(what)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StudentHasEnrollments,
                format!("Student still has {what}, delete them first"),
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to delete student",
            e,
        )),
    }
}
