use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单科成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub enrollment_id: i64,
    pub subject_id: i64,
    pub exam_mark: f64,
    pub assign_mark: f64,
    // 加权总评，保留两位小数
    pub final_mark: f64,
    // 等级，如 "B+"
    pub grade: String,
    // 等级对应的分值
    pub score: f64,
    // score × 学分
    pub grade_point: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 带课程信息的成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub subject_code: String,
    pub subject_name: String,
    pub credit_hours: i32,
}
