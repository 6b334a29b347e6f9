//! 公开成绩查询（无需登录）

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PublicResultQuery {
    pub student_number: String,
    pub semester_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PublicGradeRow {
    pub subject_code: String,
    pub subject_name: String,
    pub credit_hours: i32,
    pub final_mark: f64,
    pub grade: String,
    pub score: f64,
    pub grade_point: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PublicSemesterResult {
    pub semester_id: i64,
    pub semester_name: String,
    pub academic_year_name: String,
    pub class_name: String,
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub grades: Vec<PublicGradeRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PublicResultResponse {
    pub student_number: String,
    pub student_name: String,
    pub results: Vec<PublicSemesterResult>,
}
