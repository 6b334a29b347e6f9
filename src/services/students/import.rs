use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Data, Range, Reader, Xlsx};
use futures_util::StreamExt;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use tracing::{error, info};

use super::{StudentService, validate_student_fields};
use crate::models::students::entities::Gender;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::{StudentImportResponse, StudentImportRowError};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::is_unique_violation;
use crate::utils::validate_magic_bytes;

const MAX_IMPORT_SIZE: usize = 10 * 1024 * 1024;

/// 导入解析错误
#[derive(Debug)]
enum ImportParseError {
    EmptyFile,
    MissingColumn(String),
    ParseFailed(String),
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            ImportParseError::EmptyFile => ErrorCode::ImportDataInvalid,
            ImportParseError::MissingColumn(_) => ErrorCode::ImportMissingColumn,
            ImportParseError::ParseFailed(_) => ErrorCode::ImportParseFailed,
        }
    }

    fn message(&self) -> String {
        match self {
            ImportParseError::EmptyFile => "The worksheet has no rows".to_string(),
            ImportParseError::MissingColumn(col) => format!("Missing required column: {col}"),
            ImportParseError::ParseFailed(msg) => msg.clone(),
        }
    }
}

/// 表格中的一行，保留原始文本供错误提示
#[derive(Debug, Clone, PartialEq)]
struct ImportRow {
    row_num: usize,
    student_number: String,
    name: String,
    email: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<String>,
}

pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    if !file_name.to_lowercase().ends_with(".xlsx") || !validate_magic_bytes(&file_bytes, ".xlsx")
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "Only .xlsx workbooks can be imported",
        )));
    }

    let rows = match parse_xlsx(&file_bytes) {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    let mut imported = 0;
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for row in &rows {
        let reject = |reason: String| StudentImportRowError {
            row: row.row_num,
            student_number: (!row.student_number.is_empty()).then(|| row.student_number.clone()),
            reason,
        };

        let req = match build_request(row) {
            Ok(req) => req,
            Err(reason) => {
                errors.push(reject(reason));
                continue;
            }
        };

        if !seen.insert(req.student_number.clone()) {
            errors.push(reject("Duplicate student number in file".to_string()));
            continue;
        }

        match storage.get_student_by_number(&req.student_number).await {
            Ok(Some(_)) => {
                errors.push(reject("Student number already exists".to_string()));
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Import lookup failed for row {}: {}", row.row_num, e);
                errors.push(reject(format!("Lookup failed: {e}")));
                continue;
            }
        }

        match storage.create_student(req).await {
            Ok(_) => imported += 1,
            Err(e) if is_unique_violation(&e) => {
                errors.push(reject("Student number already exists".to_string()));
            }
            Err(e) => {
                error!("Failed to import row {}: {}", row.row_num, e);
                errors.push(reject(format!("Create failed: {e}")));
            }
        }
    }

    info!(
        "Student import finished: {} of {} rows imported",
        imported,
        rows.len()
    );

    let response = StudentImportResponse {
        total: rows.len(),
        imported,
        failed: errors.len(),
        errors,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

async fn read_file_from_multipart(
    payload: &mut Multipart,
) -> Result<(Vec<u8>, String), (ErrorCode, String)> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| (ErrorCode::FileUploadFailed, format!("Failed to read field: {e}")))?;

        if field.name() != Some("file") {
            continue;
        }
        if !file_bytes.is_empty() {
            return Err((
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time".to_string(),
            ));
        }

        if let Some(content_disposition) = field.content_disposition() {
            file_name = content_disposition
                .get_filename()
                .unwrap_or("students.xlsx")
                .to_string();
        }

        while let Some(chunk) = field.next().await {
            let data = chunk
                .map_err(|e| (ErrorCode::FileUploadFailed, format!("Failed to read data: {e}")))?;
            if file_bytes.len() + data.len() > MAX_IMPORT_SIZE {
                return Err((
                    ErrorCode::FileSizeExceeded,
                    format!("Import file exceeds {MAX_IMPORT_SIZE} bytes"),
                ));
            }
            file_bytes.extend_from_slice(&data);
        }
    }

    if file_bytes.is_empty() {
        return Err((ErrorCode::FileNotFound, "No file field found".to_string()));
    }

    Ok((file_bytes, file_name))
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to open workbook: {e}")))?;

    // 只读取第一个工作表
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("Workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read worksheet: {e}")))?;

    rows_from_range(&range)
}

fn rows_from_range(range: &Range<Data>) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rows_iter = range.rows();

    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let header_map: HashMap<String, usize> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.to_string().trim().to_lowercase(), i))
        .collect();

    let required = |col: &str| {
        header_map
            .get(col)
            .copied()
            .ok_or_else(|| ImportParseError::MissingColumn(col.to_string()))
    };
    let number_idx = required("student_number")?;
    let name_idx = required("name")?;
    let email_idx = header_map.get("email").copied();
    let gender_idx = header_map.get("gender").copied();
    let dob_idx = header_map.get("date_of_birth").copied();

    let mut rows = Vec::new();
    for (offset, row) in rows_iter.enumerate() {
        let get_cell = |idx: usize| -> String {
            row.get(idx)
                .map(cell_text)
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        let optional = |idx: Option<usize>| idx.map(&get_cell).filter(|s| !s.is_empty());

        let student_number = get_cell(number_idx);
        let name = get_cell(name_idx);
        let email = optional(email_idx);
        let gender = optional(gender_idx);
        let date_of_birth = optional(dob_idx);

        // 跳过整行为空的行
        if student_number.is_empty()
            && name.is_empty()
            && email.is_none()
            && gender.is_none()
            && date_of_birth.is_none()
        {
            continue;
        }

        rows.push(ImportRow {
            row_num: offset + 2, // 从 1 开始，跳过表头
            student_number,
            name,
            email,
            gender,
            date_of_birth,
        });
    }

    Ok(rows)
}

/// 日期单元格转为 `YYYY-MM-DD`，其余单元格取文本
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        _ => cell.to_string(),
    }
}

fn excel_serial_to_date(serial: f64) -> Option<chrono::NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate, String> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Ok(date);
    }
    // 数字形式的 Excel 日期序列号
    raw.parse::<f64>()
        .ok()
        .and_then(excel_serial_to_date)
        .ok_or_else(|| format!("Invalid date of birth: {raw}"))
}

fn build_request(row: &ImportRow) -> Result<CreateStudentRequest, String> {
    let gender = row
        .gender
        .as_deref()
        .map(|g| g.parse::<Gender>())
        .transpose()?;
    let date_of_birth = row.date_of_birth.as_deref().map(parse_date).transpose()?;

    validate_student_fields(
        &row.student_number,
        &row.name,
        row.email.as_deref(),
        date_of_birth,
    )?;

    Ok(CreateStudentRequest {
        student_number: row.student_number.clone(),
        name: row.name.clone(),
        email: row.email.clone(),
        gender,
        date_of_birth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[&[&str]]) -> Range<Data> {
        let rows = cells.len() as u32;
        let cols = cells.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (rows - 1, cols - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), Data::String(value.to_string()));
            }
        }
        range
    }

    #[test]
    fn test_rows_from_range_maps_columns() {
        let range = sheet(&[
            &["Name", "Student_Number", "Gender", "Date_Of_Birth"],
            &["Ada Obi", "U2024-0001", "f", "2003-04-05"],
            &["", "", "", ""],
            &["Ben Eze", "U2024-0002", "", ""],
        ]);
        let rows = rows_from_range(&range).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_number, "U2024-0001");
        assert_eq!(rows[0].gender.as_deref(), Some("f"));
        assert_eq!(rows[1].row_num, 4);
        assert_eq!(rows[1].date_of_birth, None);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let range = sheet(&[&["name", "email"], &["Ada", "ada@uni.edu"]]);
        match rows_from_range(&range) {
            Err(ImportParseError::MissingColumn(col)) => assert_eq!(col, "student_number"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_build_request_validates_row() {
        let mut row = ImportRow {
            row_num: 2,
            student_number: "U2024-0001".to_string(),
            name: "Ada Obi".to_string(),
            email: None,
            gender: Some("female".to_string()),
            date_of_birth: Some("05/04/2003".to_string()),
        };
        let req = build_request(&row).unwrap();
        assert_eq!(req.gender, Some(Gender::Female));
        assert_eq!(
            req.date_of_birth,
            chrono::NaiveDate::from_ymd_opt(2003, 4, 5)
        );

        row.gender = Some("unknown".to_string());
        assert!(build_request(&row).is_err());
    }

    #[test]
    fn test_excel_serial_dates() {
        assert_eq!(
            excel_serial_to_date(45292.0),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(parse_date("45292").ok(), chrono::NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(parse_date("yesterday").is_err());
    }
}
