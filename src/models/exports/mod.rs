use serde::{Deserialize, Serialize};
use ts_rs::TS;

// HTML 转 PDF 请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/export.ts")]
pub struct PdfExportRequest {
    pub html: String,
    /// 下载文件名，不含扩展名
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/export.ts")]
pub struct ResultsXlsxQuery {
    pub semester_id: i64,
}

// 成绩单模板中的一行课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/export.ts")]
pub struct DocumentSubjectRow {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub credit_hours: String,
    pub exam_mark: String,
    pub assign_mark: String,
    pub final_mark: String,
    pub grade: String,
    pub grade_point: String,
}

// DOCX 成绩单模板字段，数值均已格式化为字符串
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/export.ts")]
pub struct ResultDocumentFields {
    pub student_number: String,
    pub student_name: String,
    pub class_name: String,
    pub semester_name: String,
    pub academic_year_name: String,
    pub total_credit_hours: String,
    pub total_grade_points: String,
    pub gpa: String,
    pub generated_at: String,
    pub subjects: Vec<DocumentSubjectRow>,
}
