//! 路径参数安全提取器
//!
//! 在进入处理函数前校验路径参数，非法值直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_name::validate_file_name;

fn bad_path_parameter(param: &str, raw: &str, reason: &str) -> actix_web::Error {
    InternalError::from_response(
        format!("Invalid path parameter `{param}`: {raw}"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid path parameter `{param}`: {reason}"),
        )),
    )
    .into()
}

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_path_parameter(param, raw, "must be a positive integer")),
    }
}

macro_rules! define_safe_id_extractors {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractors! {
    SafeIDI64 => "id",
    SafeAcademicYearIdI64 => "academic_year_id",
    SafeSemesterIdI64 => "semester_id",
    SafeClassIdI64 => "class_id",
    SafeSubjectIdI64 => "subject_id",
    SafeStudentIdI64 => "student_id",
    SafeEnrollmentIdI64 => "enrollment_id",
    SafeGradeScaleIdI64 => "grade_scale_id",
    SafeUserIdI64 => "user_id",
}

/// 文件名参数（拒绝路径穿越）
#[derive(Debug, Clone)]
pub struct SafeFileName(pub String);

impl FromRequest for SafeFileName {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("filename").unwrap_or_default();
        ready(match validate_file_name(raw) {
            Ok(()) => Ok(SafeFileName(raw.to_string())),
            Err(reason) => Err(bad_path_parameter("filename", raw, reason)),
        })
    }
}
