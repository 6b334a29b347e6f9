pub mod avatar;
pub mod create;
pub mod delete;
pub mod import;
pub mod list;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_display_text, validate_email, validate_student_number};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_students(
        &self,
        query: StudentQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_student(self, id, request).await
    }

    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, update, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    // 上传头像
    pub async fn upload_avatar(
        &self,
        id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        avatar::upload_avatar(self, id, payload, request).await
    }

    // 从 XLSX 批量导入
    pub async fn import_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, payload, request).await
    }
}

/// 学生字段校验，返回可直接展示的错误信息
pub(crate) fn validate_student_fields(
    student_number: &str,
    name: &str,
    email: Option<&str>,
    date_of_birth: Option<chrono::NaiveDate>,
) -> Result<(), String> {
    validate_student_number(student_number).map_err(str::to_string)?;
    validate_display_text(name, 100).map_err(|e| format!("Invalid student name: {e}"))?;
    if let Some(email) = email {
        validate_email(email).map_err(str::to_string)?;
    }
    if let Some(dob) = date_of_birth
        && dob > chrono::Utc::now().date_naive()
    {
        return Err(format!("Date of birth {dob} is in the future"));
    }
    Ok(())
}

pub(crate) fn invalid_student(msg: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_student_field_validation() {
        assert!(validate_student_fields("U2024-0001", "Ada Obi", None, None).is_ok());
        assert!(
            validate_student_fields("U2024-0001", "Ada Obi", Some("ada@uni.edu"), None).is_ok()
        );
        assert!(validate_student_fields("U2024-0001", "Ada Obi", Some("not-mail"), None).is_err());
        assert!(validate_student_fields("#1", "Ada Obi", None, None).is_err());
        assert!(validate_student_fields("U2024-0001", " ", None, None).is_err());

        let future = NaiveDate::from_ymd_opt(2999, 1, 1);
        assert!(validate_student_fields("U2024-0001", "Ada Obi", None, future).is_err());
    }
}
