use crate::models::common::{PaginationQuery, SortSpec};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub semester_id: Option<i64>,
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    /// 在学生姓名与学号中搜索
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl EnrollmentQueryParams {
    pub const SORT_FIELDS: &'static [&'static str] = &["enrolled_at", "student_name"];
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub class_id: i64,
    pub semester_id: i64,
}

// 调整班级（学生与学期不可修改）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub class_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EnrollmentListQuery {
    pub page: u64,
    pub size: u64,
    pub semester_id: Option<i64>,
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}
