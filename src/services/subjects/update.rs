use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, validate_subject_fields};
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, is_unique_violation, storage_error_response};

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    mut update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_subject_by_id(id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::BadRequest, "Failed to get subject", e));
        }
    };

    update.code = update.code.map(|c| c.trim().to_string());
    update.name = update.name.map(|n| n.trim().to_string());

    if let Err(resp) = validate_subject_fields(
        update.code.as_deref().unwrap_or(&existing.code),
        update.name.as_deref().unwrap_or(&existing.name),
        update.credit_hours.unwrap_or(existing.credit_hours),
        update.exam_weight.unwrap_or(existing.exam_weight),
        update.assign_weight.unwrap_or(existing.assign_weight),
    ) {
        return Ok(resp);
    }

    if let Some(code) = update.code.as_deref()
        && code != existing.code
    {
        match storage.get_subject_by_code(code).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SubjectAlreadyExists,
                    format!("Subject code '{code}' already exists"),
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
    }

    // 学分或权重变化会触发成绩重算，可能因等级标准缺口失败
    match storage.update_subject(id, update).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated", subject.code);
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::SubjectWeightsInvalid,
            "Failed to update subject",
            e,
        )),
    }
}
