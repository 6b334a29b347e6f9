use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::collections::BTreeSet;
use tracing::{error, info};

use super::{ExportService, sanitize_download_name};
use crate::models::exports::ResultsXlsxQuery;
use crate::models::results::entities::SemesterResultWithGrades;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 每个学生一行，课程按代码排序成列
pub(crate) fn build_results_workbook(
    results: &[SemesterResultWithGrades],
) -> Result<Vec<u8>, XlsxError> {
    // 学期内出现过的全部课程
    let subject_cols: Vec<&str> = results
        .iter()
        .flat_map(|r| r.grades.iter())
        .map(|g| g.subject_code.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let number = Format::new().set_num_format("0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Results")?;

    let mut headers: Vec<String> = vec![
        "Student Number".into(),
        "Student Name".into(),
        "Class".into(),
    ];
    headers.extend(subject_cols.iter().map(|code| format!("{code} (Mark / Grade)")));
    headers.extend([
        "Total Credit Hours".into(),
        "Total Grade Points".into(),
        "GPA".into(),
    ]);

    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, &bold)?;
    }
    sheet.set_column_width(0, 16)?;
    sheet.set_column_width(1, 24)?;
    sheet.set_column_width(2, 18)?;
    sheet.set_freeze_panes(1, 0)?;

    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        let detail = &result.detail;
        sheet.write_string(row, 0, &detail.student_number)?;
        sheet.write_string(row, 1, &detail.student_name)?;
        sheet.write_string(row, 2, &detail.class_name)?;

        for (offset, code) in subject_cols.iter().enumerate() {
            let col = (3 + offset) as u16;
            if let Some(g) = result.grades.iter().find(|g| g.subject_code == *code) {
                sheet.write_string(
                    row,
                    col,
                    format!("{:.2} / {}", g.grade.final_mark, g.grade.grade),
                )?;
            }
        }

        let base = (3 + subject_cols.len()) as u16;
        sheet.write_number(row, base, detail.result.total_credit_hours as f64)?;
        sheet.write_number_with_format(row, base + 1, detail.result.total_grade_points, &number)?;
        sheet.write_number_with_format(row, base + 2, detail.result.gpa, &number)?;
    }

    workbook.save_to_buffer()
}

pub async fn results_xlsx(
    service: &ExportService,
    query: ResultsXlsxQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let semester = match storage.get_semester_by_id(query.semester_id).await {
        Ok(Some(semester)) => semester,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SemesterNotFound,
                "Semester not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::ExportFailed, "Failed to load semester", e));
        }
    };

    let results = match storage.list_results_for_semester(semester.id).await {
        Ok(results) => results,
        Err(e) => {
            return Ok(storage_error_response(ErrorCode::ExportFailed, "Failed to load results", e));
        }
    };

    match build_results_workbook(&results) {
        Ok(buffer) => {
            let filename = sanitize_download_name(Some(&semester.name), "results");
            info!(
                "Exported {} results of semester {} to XLSX",
                results.len(),
                semester.id
            );
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, XLSX_CONTENT_TYPE))
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}-results.xlsx\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("XLSX export failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ExportFailed,
                format!("XLSX export failed: {e}"),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_workbook_is_valid_zip() {
        let buffer = build_results_workbook(&[]).unwrap();
        assert!(buffer.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
