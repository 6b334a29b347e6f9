use super::entities::{AcademicYearResultDetail, SemesterResultDetail};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SemesterResultListResponse {
    pub items: Vec<SemesterResultDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AcademicYearResultListResponse {
    pub items: Vec<AcademicYearResultDetail>,
    pub pagination: PaginationInfo,
}
