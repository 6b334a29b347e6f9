use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::grades::requests::UpsertGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, storage_error_response};
use crate::storage::GradeUpsertOutcome;
use crate::utils::grading::validate_mark;

pub async fn upsert_grade(
    service: &GradeService,
    enrollment_id: i64,
    req: UpsertGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    for (label, mark) in [("Exam mark", req.exam_mark), ("Assignment mark", req.assign_mark)] {
        if let Err(e) = validate_mark(mark) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::GradeMarkInvalid,
                format!("{label}: {e}"),
            )));
        }
    }

    let subject_id = req.subject_id;
    match storage.upsert_grade(enrollment_id, req).await {
        Ok(GradeUpsertOutcome::Saved(response)) => {
            info!(
                "Grade saved for enrollment {} subject {}: {} ({}), GPA now {}",
                enrollment_id,
                subject_id,
                response.grade.final_mark,
                response.grade.grade,
                response.result.gpa
            );
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Grade saved successfully")))
        }
        Ok(GradeUpsertOutcome::EnrollmentNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::EnrollmentNotFound, "Enrollment not found"),
        )),
        Ok(GradeUpsertOutcome::SubjectNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SubjectNotFound, "Subject not found"),
        )),
        Ok(GradeUpsertOutcome::SubjectNotInClass) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(
                ErrorCode::SubjectNotInClass,
                "Subject is not offered by the enrollment's class",
            ),
        )),
        // 等级标准缺口返回 422，且没有写入任何数据
        Err(e) => Ok(storage_error_response(
            ErrorCode::GradeMarkInvalid,
            "Failed to save grade",
            e,
        )),
    }
}
