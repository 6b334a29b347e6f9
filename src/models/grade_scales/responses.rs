use super::entities::GradeScale;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct GradeScaleListResponse {
    pub items: Vec<GradeScale>,
}
