use super::entities::AcademicYear;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct AcademicYearListResponse {
    pub items: Vec<AcademicYear>,
    pub pagination: PaginationInfo,
}
