use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, invalid_student, validate_student_fields};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, storage_error_response};

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    req.student_number = req.student_number.trim().to_string();
    req.name = req.name.trim().to_string();
    req.email = req
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    if let Err(msg) = validate_student_fields(
        &req.student_number,
        &req.name,
        req.email.as_deref(),
        req.date_of_birth,
    ) {
        return Ok(invalid_student(msg));
    }

    match storage.get_student_by_number(&req.student_number).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                format!("Student number '{}' already exists", req.student_number),
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

    match storage.create_student(req).await {
        Ok(student) => {
            info!("Student {} created", student.student_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StudentAlreadyExists, "Student already exists"),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::StudentInvalid,
            "Failed to create student",
            e,
        )),
    }
}
