pub mod attendance;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod payments;
pub mod users;
pub mod wages;

pub use common::response::ApiResponse;

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 约定：0 成功；404xx 资源不存在；409xx 冲突；422xx 输入校验失败；500xx 服务器内部错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,

    ClassNotFound = 40401,
    StudentNotFound = 40402,
    TeacherNotFound = 40403,
    PaymentNotFound = 40404,
    AttendanceNotFound = 40405,
    UserNotFound = 40406,

    DuplicateEnrollment = 40901,
    ClassFull = 40902,
    TeacherOverAssigned = 40903,
    ClassUnavailable = 40904,
    DuplicateAttendance = 40905,

    ValidationFailed = 42200,
    ScheduleViolation = 42201,
    DiscountOutOfRange = 42202,
    PaymentAmountInvalid = 42203,
    StudentNotEnrolled = 42204,

    InternalServerError = 50000,
    TransactionFailed = 50001,
}
