pub mod create;
pub mod current;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::semesters::requests::{
    CreateSemesterRequest, SemesterQueryParams, UpdateSemesterRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct SemesterService {
    storage: Option<Arc<dyn Storage>>,
}

impl SemesterService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_semesters(
        &self,
        query: SemesterQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_semesters(self, query, request).await
    }

    pub async fn get_semester(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_semester(self, id, request).await
    }

    pub async fn create_semester(
        &self,
        req: CreateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_semester(self, req, request).await
    }

    pub async fn update_semester(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_semester(self, id, update, request).await
    }

    pub async fn delete_semester(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_semester(self, id, request).await
    }

    pub async fn set_current_semester(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        current::set_current_semester(self, id, request).await
    }
}

fn validate_semester_fields(
    name: &str,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
) -> Result<(), HttpResponse> {
    if let Err(e) = crate::utils::validate::validate_display_text(name, 50) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid semester name: {e}"),
        )));
    }
    if start_date >= end_date {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SemesterInvalidDates,
            format!("Start date {start_date} must be before end date {end_date}"),
        )));
    }
    Ok(())
}

/// 学年必须存在，且学年内学期名称唯一
async fn check_year_and_name(
    storage: &Arc<dyn Storage>,
    academic_year_id: i64,
    name: &str,
) -> Result<(), HttpResponse> {
    match storage.get_academic_year_by_id(academic_year_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AcademicYearNotFound,
                "Academic year not found",
            )));
        }
        Err(e) => {
            return Err(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to get academic year",
                e,
            ));
        }
    }

    match storage
        .get_semester_by_year_and_name(academic_year_id, name)
        .await
    {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SemesterAlreadyExists,
            format!("Semester '{name}' already exists in this academic year"),
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to check semester name",
            e,
        )),
    }
}
