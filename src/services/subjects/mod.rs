pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectQueryParams, UpdateSubjectRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::grading::{MAX_CREDIT_HOURS, validate_weights};
use crate::utils::validate::{validate_display_text, validate_subject_code};

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_subjects(
        &self,
        query: SubjectQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, query, request).await
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_subject(self, id, request).await
    }

    pub async fn create_subject(
        &self,
        req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, req, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, id, update, request).await
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, id, request).await
    }
}

/// 课程字段校验，更新时传入合并后的值
pub(crate) fn validate_subject_fields(
    code: &str,
    name: &str,
    credit_hours: i32,
    exam_weight: f64,
    assign_weight: f64,
) -> Result<(), HttpResponse> {
    let bad = |err_code: ErrorCode, msg: String| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(err_code, msg))
    };

    validate_subject_code(code).map_err(|e| bad(ErrorCode::BadRequest, e.to_string()))?;
    validate_display_text(name, 100)
        .map_err(|e| bad(ErrorCode::BadRequest, format!("Invalid subject name: {e}")))?;
    if !(1..=MAX_CREDIT_HOURS).contains(&credit_hours) {
        return Err(bad(
            ErrorCode::BadRequest,
            format!("Credit hours must be between 1 and {MAX_CREDIT_HOURS}, got {credit_hours}"),
        ));
    }
    validate_weights(exam_weight, assign_weight)
        .map_err(|e| bad(ErrorCode::SubjectWeightsInvalid, e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_field_validation() {
        assert!(validate_subject_fields("CS101", "Programming", 3, 0.7, 0.3).is_ok());
        assert!(validate_subject_fields("cs101", "Programming", 3, 0.7, 0.3).is_err());
        assert!(validate_subject_fields("CS101", "Programming", 0, 0.7, 0.3).is_err());
        assert!(validate_subject_fields("CS101", "Programming", 60, 0.7, 0.3).is_ok());
        assert!(validate_subject_fields("CS101", "Programming", 61, 0.7, 0.3).is_err());
        assert!(validate_subject_fields("CS101", "Programming", i32::MAX, 0.7, 0.3).is_err());
        let resp = validate_subject_fields("CS101", "Programming", 3, 0.6, 0.3).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
