use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::grading::SubjectWeights;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    // 课程代码，全局唯一
    pub code: String,
    pub name: String,
    pub credit_hours: i32,
    // 考试与平时成绩权重，和为 1
    pub exam_weight: f64,
    pub assign_weight: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Subject {
    /// 数据库中的权重已在写入时校验
    pub fn weights(&self) -> SubjectWeights {
        SubjectWeights {
            exam: self.exam_weight,
            assign: self.assign_weight,
        }
    }
}
