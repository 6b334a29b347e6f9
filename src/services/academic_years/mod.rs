pub mod create;
pub mod current;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academic_years::requests::{
    AcademicYearQueryParams, CreateAcademicYearRequest, UpdateAcademicYearRequest,
};
use crate::storage::Storage;

pub struct AcademicYearService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicYearService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_academic_years(
        &self,
        query: AcademicYearQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_academic_years(self, query, request).await
    }

    pub async fn get_academic_year(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::get_academic_year(self, id, request).await
    }

    pub async fn create_academic_year(
        &self,
        req: CreateAcademicYearRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_academic_year(self, req, request).await
    }

    pub async fn update_academic_year(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_academic_year(self, id, update, request).await
    }

    pub async fn delete_academic_year(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_academic_year(self, id, request).await
    }

    // 设为当前学年
    pub async fn set_current_academic_year(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        current::set_current_academic_year(self, id, request).await
    }
}

/// 学年名称与起止日期校验
pub(crate) fn validate_year_fields(
    name: &str,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
) -> Result<(), (crate::models::ErrorCode, String)> {
    use crate::models::ErrorCode;

    crate::utils::validate::validate_display_text(name, 50)
        .map_err(|e| (ErrorCode::BadRequest, format!("Invalid academic year name: {e}")))?;
    if start_date >= end_date {
        return Err((
            ErrorCode::AcademicYearInvalidDates,
            format!("Start date {start_date} must be before end date {end_date}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_dates_must_be_ordered() {
        assert!(validate_year_fields("2024/2025", date(2024, 9, 1), date(2025, 7, 31)).is_ok());
        let (code, _) =
            validate_year_fields("2024/2025", date(2025, 7, 31), date(2024, 9, 1)).unwrap_err();
        assert_eq!(code, ErrorCode::AcademicYearInvalidDates);
        assert!(validate_year_fields("x", date(2024, 9, 1), date(2024, 9, 1)).is_err());
    }

    #[test]
    fn test_year_name_required() {
        let (code, _) =
            validate_year_fields("   ", date(2024, 9, 1), date(2025, 7, 31)).unwrap_err();
        assert_eq!(code, ErrorCode::BadRequest);
    }
}
