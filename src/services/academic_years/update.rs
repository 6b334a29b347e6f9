use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AcademicYearService, validate_year_fields};
use crate::models::academic_years::requests::UpdateAcademicYearRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, is_unique_violation, storage_error_response};

pub async fn update_academic_year(
    service: &AcademicYearService,
    id: i64,
    mut update: UpdateAcademicYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_academic_year_by_id(id).await {
        Ok(Some(year)) => year,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AcademicYearNotFound,
                "Academic year not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to get academic year",
                e,
            ));
        }
    };

    update.name = update.name.map(|n| n.trim().to_string());

    // 按合并后的值校验
    let name = update.name.as_deref().unwrap_or(&existing.name);
    let start_date = update.start_date.unwrap_or(existing.start_date);
    let end_date = update.end_date.unwrap_or(existing.end_date);
    if let Err((code, msg)) = validate_year_fields(name, start_date, end_date) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    if let Some(new_name) = update.name.as_deref()
        && new_name != existing.name
    {
        match storage.get_academic_year_by_name(new_name).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AcademicYearAlreadyExists,
                    format!("Academic year '{new_name}' already exists"),
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::BadRequest,
                    "Failed to check academic year name",
                    e,
                ));
            }
        }
    }

    match storage.update_academic_year(id, update).await {
        Ok(Some(year)) => {
            info!("Academic year {} updated", year.id);
            // 公开查询结果里带有学年名称
            invalidate_results(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                year,
                "Academic year updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AcademicYearNotFound,
            "Academic year not found",
        ))),
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AcademicYearAlreadyExists,
                "Academic year already exists",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to update academic year",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::cache::{ObjectCache, RESULTS_TAG, get_tagged, insert_tagged};
    use crate::models::academic_years::requests::CreateAcademicYearRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::{test::TestRequest, web};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_rename_invalidates_public_results() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let cache: Arc<dyn ObjectCache> =
            Arc::new(MokaCacheWrapper::with_capacity(100, Duration::from_secs(60)));

        let year = storage
            .create_academic_year(CreateAcademicYearRequest {
                name: "2024/2025".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
            })
            .await
            .unwrap();
        insert_tagged(cache.as_ref(), RESULTS_TAG, "U2024-0001:all", &"2024/2025", 60).await;

        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();
        let resp = update_academic_year(
            &AcademicYearService::new_lazy(),
            year.id,
            UpdateAcademicYearRequest {
                name: Some("AY 2024/2025".into()),
                start_date: None,
                end_date: None,
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let cached: Option<String> =
            get_tagged(cache.as_ref(), RESULTS_TAG, "U2024-0001:all").await;
        assert!(cached.is_none());
    }
}
