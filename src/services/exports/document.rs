use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExportService;
use crate::models::exports::{DocumentSubjectRow, ResultDocumentFields};
use crate::models::results::entities::SemesterResultWithGrades;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

/// 把学期结果展开为模板字段
pub(crate) fn build_document_fields(
    result: &SemesterResultWithGrades,
    academic_year_name: &str,
    generated_at: chrono::DateTime<chrono::Utc>,
) -> ResultDocumentFields {
    let detail = &result.detail;
    let subjects = result
        .grades
        .iter()
        .enumerate()
        .map(|(i, g)| DocumentSubjectRow {
            index: i + 1,
            code: g.subject_code.clone(),
            name: g.subject_name.clone(),
            credit_hours: g.credit_hours.to_string(),
            exam_mark: fmt2(g.grade.exam_mark),
            assign_mark: fmt2(g.grade.assign_mark),
            final_mark: fmt2(g.grade.final_mark),
            grade: g.grade.grade.clone(),
            grade_point: fmt2(g.grade.grade_point),
        })
        .collect();

    ResultDocumentFields {
        student_number: detail.student_number.clone(),
        student_name: detail.student_name.clone(),
        class_name: detail.class_name.clone(),
        semester_name: detail.semester_name.clone(),
        academic_year_name: academic_year_name.to_string(),
        total_credit_hours: detail.result.total_credit_hours.to_string(),
        total_grade_points: fmt2(detail.result.total_grade_points),
        gpa: fmt2(detail.result.gpa),
        generated_at: generated_at.format("%Y-%m-%d").to_string(),
        subjects,
    }
}

pub async fn result_document(
    service: &ExportService,
    enrollment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let result = match storage.get_result_by_enrollment(enrollment_id).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ResultNotFound,
                "No result computed for this enrollment",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::ExportFailed, "Failed to load result", e));
        }
    };

    let academic_year_name = match storage.get_semester_by_id(result.detail.semester_id).await {
        Ok(Some(semester)) => match storage.get_academic_year_by_id(semester.academic_year_id).await {
            Ok(year) => year.map(|y| y.name).unwrap_or_default(),
            Err(e) => {
                return Ok(storage_error_response(
                    ErrorCode::ExportFailed,
                    "Failed to load academic year",
                    e,
                ));
            }
        },
        Ok(None) => String::new(),
        Err(e) => {
            return Ok(storage_error_response(
                ErrorCode::ExportFailed,
                "Failed to load semester",
                e,
            ));
        }
    };

    let fields = build_document_fields(&result, &academic_year_name, chrono::Utc::now());
    Ok(HttpResponse::Ok().json(ApiResponse::success(fields, "Document fields generated")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::{Grade, GradeDetail};
    use crate::models::results::entities::{SemesterResult, SemesterResultDetail};

    fn sample() -> SemesterResultWithGrades {
        let now = chrono::Utc::now();
        SemesterResultWithGrades {
            detail: SemesterResultDetail {
                result: SemesterResult {
                    id: 1,
                    enrollment_id: 7,
                    total_credit_hours: 3,
                    total_grade_points: 9.9,
                    gpa: 3.3,
                    computed_at: now,
                },
                student_id: 1,
                student_number: "U2024-0001".into(),
                student_name: "Ada Obi".into(),
                class_id: 1,
                class_name: "CS Year 1".into(),
                semester_id: 1,
                semester_name: "First Semester".into(),
            },
            grades: vec![GradeDetail {
                grade: Grade {
                    id: 1,
                    enrollment_id: 7,
                    subject_id: 1,
                    exam_mark: 80.0,
                    assign_mark: 70.0,
                    final_mark: 77.0,
                    grade: "B+".into(),
                    score: 3.3,
                    grade_point: 9.9,
                    created_at: now,
                    updated_at: now,
                },
                subject_code: "CS101".into(),
                subject_name: "Programming".into(),
                credit_hours: 3,
            }],
        }
    }

    #[test]
    fn test_document_fields_are_formatted() {
        let fields = build_document_fields(&sample(), "2024/2025", chrono::Utc::now());
        assert_eq!(fields.gpa, "3.30");
        assert_eq!(fields.total_grade_points, "9.90");
        assert_eq!(fields.academic_year_name, "2024/2025");
        assert_eq!(fields.subjects.len(), 1);
        assert_eq!(fields.subjects[0].index, 1);
        assert_eq!(fields.subjects[0].final_mark, "77.00");
        assert_eq!(fields.subjects[0].grade, "B+");
    }
}
