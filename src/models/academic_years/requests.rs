use crate::models::common::{PaginationQuery, SortSpec};
use serde::Deserialize;
use ts_rs::TS;

// 学年查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct AcademicYearQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub is_current: Option<bool>,
    /// 排序：name | start_date | created_at，可加 `.desc` 或前缀 `-`
    pub sort: Option<String>,
}

impl AcademicYearQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] = &["name", "start_date", "created_at"];
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct CreateAcademicYearRequest {
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct UpdateAcademicYearRequest {
    pub name: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

// 学年列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AcademicYearListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub is_current: Option<bool>,
    pub sort: Option<SortSpec>,
}
