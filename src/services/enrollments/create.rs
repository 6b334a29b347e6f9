use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::EnrollmentService;
use crate::errors::GradeSysError;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};
use crate::storage::Storage;

/// 学生、班级与学期都必须存在
async fn check_references(
    storage: &Arc<dyn Storage>,
    req: &CreateEnrollmentRequest,
) -> Result<(), HttpResponse> {
    let not_found = |code: ErrorCode, msg: &str| {
        HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg))
    };
    let failed = |e: GradeSysError| {
        storage_error_response(ErrorCode::BadRequest, "Failed to check enrollment", e)
    };

    if storage
        .get_student_by_id(req.student_id)
        .await
        .map_err(failed)?
        .is_none()
    {
        return Err(not_found(ErrorCode::StudentNotFound, "Student not found"));
    }
    if storage
        .get_class_by_id(req.class_id)
        .await
        .map_err(failed)?
        .is_none()
    {
        return Err(not_found(ErrorCode::ClassNotFound, "Class not found"));
    }
    if storage
        .get_semester_by_id(req.semester_id)
        .await
        .map_err(failed)?
        .is_none()
    {
        return Err(not_found(ErrorCode::SemesterNotFound, "Semester not found"));
    }
    if storage
        .get_enrollment_by_student_and_semester(req.student_id, req.semester_id)
        .await
        .map_err(failed)?
        .is_some()
    {
        return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentAlreadyExists,
            "Student is already enrolled in this semester",
        )));
    }
    Ok(())
}

pub async fn create_enrollment(
    service: &EnrollmentService,
    req: CreateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(resp) = check_references(&storage, &req).await {
        return Ok(resp);
    }

    match storage.create_enrollment(req).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in class {} for semester {}",
                enrollment.student_id, enrollment.class_id, enrollment.semester_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyExists,
                "Student is already enrolled in this semester",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to create enrollment",
            e,
        )),
    }
}
