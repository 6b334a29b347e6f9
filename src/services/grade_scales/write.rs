use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeScaleService;
use crate::models::grade_scales::requests::{CreateGradeScaleRequest, UpdateGradeScaleRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::GradeScaleWriteOutcome;
use crate::utils::grading::validate_range;
use crate::utils::validate::validate_display_text;

/// 等级名、区间与分值校验
fn validate_scale_fields(
    grade: &str,
    min_mark: f64,
    max_mark: f64,
    score: f64,
) -> Result<(), HttpResponse> {
    let invalid = |msg: String| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeScaleInvalidRange,
            msg,
        ))
    };

    validate_display_text(grade, 5).map_err(|e| invalid(format!("Invalid grade name: {e}")))?;
    validate_range(min_mark, max_mark).map_err(|e| invalid(e.to_string()))?;
    if !score.is_finite() || score < 0.0 {
        return Err(invalid(format!("Score must be a non-negative number, got {score}")));
    }
    Ok(())
}

fn write_response(outcome: GradeScaleWriteOutcome, created: bool) -> HttpResponse {
    match outcome {
        GradeScaleWriteOutcome::Saved(scale) => {
            info!(
                "Grade scale {} saved: {}-{} => {}",
                scale.grade, scale.min_mark, scale.max_mark, scale.score
            );
            if created {
                HttpResponse::Created()
                    .json(ApiResponse::success(scale, "Grade scale created successfully"))
            } else {
                HttpResponse::Ok().json(ApiResponse::success(scale, "Grade scale updated successfully"))
            }
        }
        GradeScaleWriteOutcome::NotFound => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::GradeScaleNotFound, "Grade scale not found"),
        ),
        GradeScaleWriteOutcome::Overlaps(other) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::GradeScaleOverlap,
                format!("Mark range overlaps existing grade '{other}'"),
            ),
        ),
    }
}

pub async fn create_grade_scale(
    service: &GradeScaleService,
    mut req: CreateGradeScaleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    req.grade = req.grade.trim().to_string();
    if let Err(resp) = validate_scale_fields(&req.grade, req.min_mark, req.max_mark, req.score) {
        return Ok(resp);
    }

    match storage.create_grade_scale(req).await {
        Ok(outcome) => Ok(write_response(outcome, true)),
        Err(e) => Ok(storage_error_response(
            ErrorCode::GradeScaleInvalidRange,
            "Failed to create grade scale",
            e,
        )),
    }
}

pub async fn update_grade_scale(
    service: &GradeScaleService,
    id: i64,
    mut update: UpdateGradeScaleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_grade_scale_by_id(id).await {
        Ok(Some(scale)) => scale,
        Ok(None) => return Ok(write_response(GradeScaleWriteOutcome::NotFound, false)),
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::BadRequest,
                "Failed to get grade scale",
                e,
            ));
        }
    };

    update.grade = update.grade.map(|g| g.trim().to_string());
    if let Err(resp) = validate_scale_fields(
        update.grade.as_deref().unwrap_or(&existing.grade),
        update.min_mark.unwrap_or(existing.min_mark),
        update.max_mark.unwrap_or(existing.max_mark),
        update.score.unwrap_or(existing.score),
    ) {
        return Ok(resp);
    }

    match storage.update_grade_scale(id, update).await {
        Ok(outcome) => Ok(write_response(outcome, false)),
        Err(e) => Ok(storage_error_response(
            ErrorCode::GradeScaleInvalidRange,
            "Failed to update grade scale",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_field_validation() {
        assert!(validate_scale_fields("B+", 75.0, 79.99, 3.3).is_ok());
        assert!(validate_scale_fields("B+", 80.0, 75.0, 3.3).is_err());
        assert!(validate_scale_fields("B+", 75.0, 101.0, 3.3).is_err());
        assert!(validate_scale_fields("B+", 75.0, 79.99, -1.0).is_err());
        assert!(validate_scale_fields("TOOLONG", 75.0, 79.99, 3.3).is_err());
    }

    #[test]
    fn test_overlap_maps_to_conflict() {
        let resp = write_response(GradeScaleWriteOutcome::Overlaps("A".into()), true);
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
    }
}
