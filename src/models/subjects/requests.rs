use crate::models::common::{PaginationQuery, SortSpec};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 在课程代码与名称中搜索
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl SubjectQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] =
        &["code", "name", "credit_hours", "created_at"];
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub credit_hours: i32,
    pub exam_weight: f64,
    pub assign_weight: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credit_hours: Option<i32>,
    pub exam_weight: Option<f64>,
    pub assign_weight: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}
