use super::entities::{Grade, GradeDetail};
use crate::models::results::entities::SemesterResult;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeDetail>,
}

// 写入成绩后返回成绩与重算后的学期结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeUpsertResponse {
    pub grade: Grade,
    pub result: SemesterResult,
}
