use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeScaleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::grading::{ScaleBand, check_scale_ranges};

pub async fn grade_scale_coverage(
    service: &GradeScaleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_grade_scales().await {
        Ok(scales) => {
            let bands: Vec<ScaleBand> = scales.iter().map(|s| s.to_band()).collect();
            let coverage = check_scale_ranges(&bands);
            let message = if coverage.covers_full_range {
                "Grade scale covers 0-100"
            } else {
                "Grade scale has gaps or overlaps"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(coverage, message)))
        }
        Err(e) => Ok(storage_error_response(
            ErrorCode::BadRequest,
            "Failed to check grade scale coverage",
            e,
        )),
    }
}
