//! 路径参数提取器
//!
//! 用宏批量生成各资源 ID 的安全提取器：解析失败或 ID 非正数时直接
//! 返回统一格式的 400 响应，业务代码拿到的一定是合法 ID。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, err, ok};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractors {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        paste::paste! {
            $(
                #[derive(Debug, Clone, Copy)]
                pub struct $name(pub i64);

                impl FromRequest for $name {
                    type Error = actix_web::Error;
                    type Future = Ready<Result<Self, Self::Error>>;

                    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                        match req
                            .match_info()
                            .get($param)
                            .and_then(|raw| raw.parse::<i64>().ok())
                        {
                            Some(id) if id > 0 => ok($name(id)),
                            _ => err(actix_web::error::InternalError::from_response(
                                concat!("invalid ", $param),
                                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                                    ErrorCode::BadRequest,
                                    concat!("Invalid path parameter: ", $param),
                                )),
                            )
                            .into()),
                        }
                    }
                }
            )*
        }
    };
}

define_safe_id_extractors! {
    SafeClassIdI64("class_id"),
    SafeStudentIdI64("student_id"),
    SafeTeacherIdI64("teacher_id"),
    SafePaymentIdI64("payment_id"),
    SafeAttendanceIdI64("attendance_id"),
    SafeUserIdI64("user_id"),
}
