use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::AddClassSubjectRequest;
use crate::models::classes::responses::ClassSubjectListResponse;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};

pub async fn list_class_subjects(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get class", e));
        }
    }

    match storage.list_class_subjects(class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassSubjectListResponse { items },
            "Class subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to list class subjects",
            e,
        )),
    }
}

pub async fn add_class_subject(
    service: &ClassService,
    class_id: i64,
    req: AddClassSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get class", e));
        }
    }

    match storage.get_subject_by_id(req.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get subject", e));
        }
    }

    match storage.get_class_subject(class_id, req.subject_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassSubjectAlreadyExists,
                "Subject is already offered by this class",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to check class subject",
                e,
            ));
        }
    }

    match storage.add_class_subject(class_id, req.subject_id).await {
        Ok(class_subject) => {
            info!("Subject {} added to class {}", req.subject_id, class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                class_subject,
                "Subject added to class",
            )))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassSubjectAlreadyExists,
                "Subject is already offered by this class",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to add subject to class",
            e,
        )),
    }
}

pub async fn remove_class_subject(
    service: &ClassService,
    class_id: i64,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.remove_class_subject(class_id, subject_id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("Subject {} removed from class {}", subject_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject removed from class")))
        }
        Ok(DeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(
                ErrorCode::ClassSubjectNotFound,
                "Subject is not offered by this class",
            ),
        )),
        Ok(DeleteOutcome::HasDependents(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassSubjectHasGrades,
                "Grades already recorded for this subject in the class",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to remove subject from class",
            e,
        )),
    }
}
