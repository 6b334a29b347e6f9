pub mod academic_year;
pub mod list;
pub mod recompute;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::{AcademicYearResultQueryParams, ResultQueryParams};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_results(
        &self,
        query: ResultQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, query, request).await
    }

    pub async fn get_result(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::get_result(self, enrollment_id, request).await
    }

    // 重算学期内全部结果
    pub async fn recompute_semester(
        &self,
        semester_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        recompute::recompute_semester(self, semester_id, request).await
    }

    pub async fn list_academic_year_results(
        &self,
        query: AcademicYearResultQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        academic_year::list_academic_year_results(self, query, request).await
    }

    pub async fn get_academic_year_result(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        academic_year::get_academic_year_result(self, id, request).await
    }
}
