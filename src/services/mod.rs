pub mod academic_years;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod exports;
pub mod files;
pub mod grade_scales;
pub mod grades;
pub mod public;
pub mod results;
pub mod semesters;
pub mod students;
pub mod subjects;
pub mod users;

pub use academic_years::AcademicYearService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use exports::ExportService;
pub use files::FileService;
pub use grade_scales::GradeScaleService;
pub use grades::GradeService;
pub use public::PublicService;
pub use results::ResultService;
pub use semesters::SemesterService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::{ObjectCache, RESULTS_TAG, invalidate_tag};
use crate::errors::GradeSysError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not configured")
        })
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 成绩相关数据变更后使公开查询缓存失效
pub(crate) async fn invalidate_results(request: &HttpRequest) {
    if let Some(cache) = cache_from_request(request) {
        invalidate_tag(cache.as_ref(), RESULTS_TAG).await;
    }
}

/// 把存储层错误转换为统一响应
///
/// 等级标准缺口返回 422，校验错误返回 400 并带上调用方给出的业务码。
pub(crate) fn storage_error_response(
    code: ErrorCode,
    context: &str,
    err: GradeSysError,
) -> HttpResponse {
    match err {
        GradeSysError::GradeScaleGap(msg) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::GradeScaleGap, format!("{context}: {msg}")),
        ),
        GradeSysError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(code, format!("{context}: {msg}"))),
        GradeSysError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(code, format!("{context}: {msg}"))),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {other}"),
            ))
        }
    }
}

/// 唯一约束冲突（并发创建时预检查可能漏过）
pub(crate) fn is_unique_violation(err: &GradeSysError) -> bool {
    let msg = err.message();
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key")
        || msg.contains("Duplicate entry")
}

/// 解析排序参数，失败时直接给出 400 响应
pub(crate) fn parse_sort(
    raw: Option<&str>,
    allowed: &[&str],
) -> Result<Option<crate::models::common::SortSpec>, HttpResponse> {
    crate::models::common::SortSpec::parse_allowed(raw, allowed).map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
    })
}

/// 去掉首尾空白，空串视为未提供
pub(crate) fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = GradeSysError::database_operation(
            "insert failed: UNIQUE constraint failed: students.student_number",
        );
        let pg = GradeSysError::database_operation(
            "duplicate key value violates unique constraint \"idx_enrollment\"",
        );
        let other = GradeSysError::database_operation("connection reset");
        assert!(is_unique_violation(&sqlite));
        assert!(is_unique_violation(&pg));
        assert!(!is_unique_violation(&other));
    }

    #[test]
    fn test_storage_error_status_mapping() {
        let resp = storage_error_response(
            ErrorCode::GradeMarkInvalid,
            "Upsert failed",
            GradeSysError::grade_scale_gap("no band for 42.5"),
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNPROCESSABLE_ENTITY);

        let resp = storage_error_response(
            ErrorCode::GradeMarkInvalid,
            "Upsert failed",
            GradeSysError::validation("mark out of range"),
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let resp = storage_error_response(
            ErrorCode::GradeMarkInvalid,
            "Upsert failed",
            GradeSysError::database_operation("boom"),
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  ".into())), None);
        assert_eq!(normalize_search(Some(" ann ".into())), Some("ann".into()));
        assert_eq!(normalize_search(None), None);
    }
}
