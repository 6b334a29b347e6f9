use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, validate_subject_fields};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};

pub async fn create_subject(
    service: &SubjectService,
    mut req: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    req.code = req.code.trim().to_string();
    req.name = req.name.trim().to_string();
    if let Err(resp) = validate_subject_fields(
        &req.code,
        &req.name,
        req.credit_hours,
        req.exam_weight,
        req.assign_weight,
    ) {
        return Ok(resp);
    }

    match storage.get_subject_by_code(&req.code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                format!("Subject code '{}' already exists", req.code),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to check subject code",
                e,
            ));
        }
    }

    match storage.create_subject(req).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.code, subject.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::SubjectWeightsInvalid,
            "Failed to create subject",
            e,
        )),
    }
}
