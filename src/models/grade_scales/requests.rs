use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct CreateGradeScaleRequest {
    pub grade: String,
    pub min_mark: f64,
    pub max_mark: f64,
    pub score: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct UpdateGradeScaleRequest {
    pub grade: Option<String>,
    pub min_mark: Option<f64>,
    pub max_mark: Option<f64>,
    pub score: Option<f64>,
}
