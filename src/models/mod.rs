pub mod academic_years;
pub mod auth;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod exports;
pub mod grade_scales;
pub mod grades;
pub mod public;
pub mod results;
pub mod semesters;
pub mod students;
pub mod subjects;
pub mod users;

pub use common::{ApiResponse, DeleteOutcome, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 按领域分段：1xxx 通用与认证，2xxx 教务数据，3xxx 文件、导入与导出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1029,

    // 认证
    AuthFailed = 1100,

    // 用户
    UserNotFound = 1200,
    UserAlreadyExists = 1201,
    UserNameInvalid = 1202,
    UserEmailInvalid = 1203,
    UserPasswordInvalid = 1204,
    CanNotDeleteCurrentUser = 1205,

    // 学年
    AcademicYearNotFound = 2000,
    AcademicYearAlreadyExists = 2001,
    AcademicYearHasSemesters = 2002,
    AcademicYearInvalidDates = 2003,

    // 学期
    SemesterNotFound = 2100,
    SemesterAlreadyExists = 2101,
    SemesterHasEnrollments = 2102,
    SemesterInvalidDates = 2103,

    // 班级
    ClassNotFound = 2200,
    ClassAlreadyExists = 2201,
    ClassHasDependents = 2202,
    ClassSubjectAlreadyExists = 2203,
    ClassSubjectNotFound = 2204,
    ClassSubjectHasGrades = 2205,

    // 课程
    SubjectNotFound = 2300,
    SubjectAlreadyExists = 2301,
    SubjectHasDependents = 2302,
    SubjectWeightsInvalid = 2303,
    SubjectNotInClass = 2304,

    // 学生
    StudentNotFound = 2400,
    StudentAlreadyExists = 2401,
    StudentHasEnrollments = 2402,
    StudentInvalid = 2403,

    // 选课
    EnrollmentNotFound = 2500,
    EnrollmentAlreadyExists = 2501,
    EnrollmentHasGrades = 2502,

    // 成绩
    GradeNotFound = 2600,
    GradeMarkInvalid = 2601,
    GradeScaleGap = 2602,

    // 等级表
    GradeScaleNotFound = 2700,
    GradeScaleOverlap = 2701,
    GradeScaleInvalidRange = 2702,

    // 绩点结果
    ResultNotFound = 2800,

    // 文件
    FileNotFound = 3000,
    FileTypeNotAllowed = 3001,
    FileSizeExceeded = 3002,
    FileUploadFailed = 3003,
    FileNameInvalid = 3004,
    MultifileUploadNotAllowed = 3005,

    // 导入
    ImportParseFailed = 3100,
    ImportMissingColumn = 3101,
    ImportDataInvalid = 3102,

    // 导出
    ExportFailed = 3200,
    ExportUnavailable = 3201,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AcademicYearHasSemesters as i32, 2002);
        assert_eq!(ErrorCode::GradeScaleGap as i32, 2602);
        assert_eq!(ErrorCode::ExportUnavailable as i32, 3201);
    }
}
