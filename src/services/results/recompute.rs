use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ResultService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalidate_results, storage_error_response};

pub async fn recompute_semester(
    service: &ResultService,
    semester_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.recompute_semester_results(semester_id).await {
        Ok(Some(report)) => {
            invalidate_results(request).await;
            if report.failures.is_empty() {
                info!(
                    "Recomputed {} results for semester {}",
                    report.recomputed, semester_id
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Results recomputed")))
            } else {
                warn!(
                    "Recompute of semester {} finished with {} failures",
                    semester_id,
                    report.failures.len()
                );
                let message = format!(
                    "{} of {} enrollments could not be recomputed",
                    report.failures.len(),
                    report.total
                );
                Ok(HttpResponse::Ok().json(ApiResponse::error(
                    ErrorCode::GradeScaleGap,
                    report,
                    message,
                )))
            }
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SemesterNotFound,
            "Semester not found",
        ))),
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to recompute results",
            e,
        )),
    }
}
