use crate::models::common::{PaginationQuery, SortSpec};
use serde::Deserialize;
use ts_rs::TS;

// 学期查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct SemesterQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year_id: Option<i64>,
    pub search: Option<String>,
    pub is_current: Option<bool>,
    pub sort: Option<String>,
}

impl SemesterQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] = &["name", "start_date", "created_at"];
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct CreateSemesterRequest {
    pub academic_year_id: i64,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct UpdateSemesterRequest {
    pub academic_year_id: Option<i64>,
    pub name: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

// 学期列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SemesterListQuery {
    pub page: u64,
    pub size: u64,
    pub academic_year_id: Option<i64>,
    pub search: Option<String>,
    pub is_current: Option<bool>,
    pub sort: Option<SortSpec>,
}
