use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::PublicService;
use crate::cache::{RESULTS_TAG, get_tagged, insert_tagged};
use crate::config::AppConfig;
use crate::models::public::{PublicResultQuery, PublicResultResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{cache_from_request, storage_error_response};
use crate::utils::validate::validate_student_number;

fn cache_key(student_number: &str, semester_id: Option<i64>) -> String {
    match semester_id {
        Some(id) => format!("{student_number}:{id}"),
        None => format!("{student_number}:all"),
    }
}

pub async fn lookup_results(
    service: &PublicService,
    query: PublicResultQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student_number = query.student_number.trim().to_string();
    if let Err(e) = validate_student_number(&student_number) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, e)));
    }

    let key = cache_key(&student_number, query.semester_id);
    let cache = cache_from_request(request);

    if let Some(cache) = cache.as_deref()
        && let Some(cached) =
            get_tagged::<PublicResultResponse>(cache, RESULTS_TAG, &key).await
    {
        debug!("Public result cache hit for {}", key);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            cached,
            "Results retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage
        .find_public_results(&student_number, query.semester_id)
        .await
    {
        Ok(Some(response)) if !response.results.is_empty() => {
            if let Some(cache) = cache.as_deref() {
                let ttl = AppConfig::get().cache.default_ttl;
                insert_tagged(cache, RESULTS_TAG, &key, &response, ttl).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Results retrieved successfully",
            )))
        }
        // 不区分学号不存在与无结果，避免枚举学号
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "No results found for this student number",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to look up results",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_semester() {
        assert_eq!(cache_key("U2024-0001", Some(3)), "U2024-0001:3");
        assert_eq!(cache_key("U2024-0001", None), "U2024-0001:all");
    }
}
