use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::grading::ScaleBand;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct GradeScale {
    pub id: i64,
    pub grade: String,
    pub min_mark: f64,
    pub max_mark: f64,
    pub score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl GradeScale {
    pub fn to_band(&self) -> ScaleBand {
        ScaleBand::new(self.grade.clone(), self.min_mark, self.max_mark, self.score)
    }
}
