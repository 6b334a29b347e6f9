use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::storage_error_response;

pub async fn delete_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_class(class_id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("Class {} deleted", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ClassNotFound, "Class not found"),
        )),
        Ok(DeleteOutcome::HasDependents(what)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassHasDependents,
                format!("Class still has {what}, remove them first"),
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Class deletion failed",
            e,
        )),
    }
}
