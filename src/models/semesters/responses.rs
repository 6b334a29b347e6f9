use super::entities::Semester;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct SemesterListResponse {
    pub items: Vec<Semester>,
    pub pagination: PaginationInfo,
}
