pub mod extractor;
pub mod file_magic;
pub mod file_name;
pub mod grading;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAcademicYearIdI64, SafeClassIdI64, SafeEnrollmentIdI64, SafeFileName,
    SafeGradeScaleIdI64, SafeIDI64, SafeSemesterIdI64, SafeStudentIdI64, SafeSubjectIdI64,
    SafeUserIdI64,
};
pub use file_magic::validate_magic_bytes;
pub use file_name::validate_file_name;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::{escape_like_pattern, like_contains};
