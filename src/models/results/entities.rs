use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::grades::entities::GradeDetail;

// 一次选课（学生 × 学期）的 GPA 结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SemesterResult {
    pub id: i64,
    pub enrollment_id: i64,
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    // 总学分为 0 时为 0
    pub gpa: f64,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SemesterResultDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: SemesterResult,
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub semester_id: i64,
    pub semester_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SemesterResultWithGrades {
    #[serde(flatten)]
    #[ts(flatten)]
    pub detail: SemesterResultDetail,
    pub grades: Vec<GradeDetail>,
}

// 学生在一个学年内全部成绩的 GPA
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AcademicYearResult {
    pub id: i64,
    pub student_id: i64,
    pub academic_year_id: i64,
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AcademicYearResultDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: AcademicYearResult,
    pub student_number: String,
    pub student_name: String,
    pub academic_year_name: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct RecomputeFailure {
    pub enrollment_id: i64,
    pub reason: String,
}

// 学期重算报告
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct RecomputeReport {
    pub semester_id: i64,
    pub total: usize,
    pub recomputed: usize,
    pub failures: Vec<RecomputeFailure>,
}
