pub mod coverage;
pub mod delete;
pub mod list;
pub mod write;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grade_scales::requests::{CreateGradeScaleRequest, UpdateGradeScaleRequest};
use crate::storage::Storage;

pub struct GradeScaleService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeScaleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_grade_scales(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_grade_scales(self, request).await
    }

    pub async fn get_grade_scale(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_grade_scale(self, id, request).await
    }

    pub async fn create_grade_scale(
        &self,
        req: CreateGradeScaleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        write::create_grade_scale(self, req, request).await
    }

    pub async fn update_grade_scale(
        &self,
        id: i64,
        update: UpdateGradeScaleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        write::update_grade_scale(self, id, update, request).await
    }

    pub async fn delete_grade_scale(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade_scale(self, id, request).await
    }

    // 覆盖情况报告
    pub async fn coverage(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        coverage::grade_scale_coverage(self, request).await
    }
}
