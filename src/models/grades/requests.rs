use serde::Deserialize;
use ts_rs::TS;

// 录入或修改成绩，按 (enrollment, subject) 唯一
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpsertGradeRequest {
    pub subject_id: i64,
    pub exam_mark: f64,
    pub assign_mark: f64,
}
