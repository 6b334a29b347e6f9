use crate::models::common::{PaginationQuery, SortSpec};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub semester_id: Option<i64>,
    pub class_id: Option<i64>,
    /// 在学生姓名与学号中搜索
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ResultQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] = &["gpa", "student_name", "computed_at"];
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AcademicYearResultQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year_id: Option<i64>,
    pub student_id: Option<i64>,
    pub sort: Option<String>,
}

impl AcademicYearResultQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] = &["gpa", "student_name", "computed_at"];
}

#[derive(Debug, Clone, Default)]
pub struct ResultListQuery {
    pub page: u64,
    pub size: u64,
    pub semester_id: Option<i64>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, Default)]
pub struct AcademicYearResultListQuery {
    pub page: u64,
    pub size: u64,
    pub academic_year_id: Option<i64>,
    pub student_id: Option<i64>,
    pub sort: Option<SortSpec>,
}
