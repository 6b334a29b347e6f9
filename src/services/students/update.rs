use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, invalid_student, validate_student_fields};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, is_unique_violation, storage_error_response};

pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_student_by_id(id).await {
        Ok(Some(student)) => student,
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

    update.student_number = update.student_number.map(|n| n.trim().to_string());
    update.name = update.name.map(|n| n.trim().to_string());
    update.email = update.email.map(|e| e.trim().to_string());

    let email = match update.email.as_deref() {
        Some("") => None,
        Some(email) => Some(email),
        None => existing.email.as_deref(),
    };
    if let Err(msg) = validate_student_fields(
        update
            .student_number
            .as_deref()
            .unwrap_or(&existing.student_number),
        update.name.as_deref().unwrap_or(&existing.name),
        email,
        update.date_of_birth.or(existing.date_of_birth),
    ) {
        return Ok(invalid_student(msg));
    }

    if let Some(number) = update.student_number.as_deref()
        && number != existing.student_number
    {
        match storage.get_student_by_number(number).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::StudentAlreadyExists,
                    format!("Student number '{number}' already exists"),
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::BadRequest,
                    "Failed to check student number",
                    e,
                ));
            }
        }
    }

    match storage.update_student(id, update).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.student_number);
            // 学号与姓名出现在公开查询结果中
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StudentAlreadyExists, "Student already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StudentInvalid,
            "Failed to update student",
            e,
        )),
    }
}
