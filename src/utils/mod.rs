pub mod datetime;
pub mod extractor;
pub mod parameter_error_handler;

pub use datetime::{day_bounds, month_year_of, parse_utc_day};
pub use extractor::{
    SafeAttendanceIdI64, SafeClassIdI64, SafePaymentIdI64, SafeStudentIdI64, SafeTeacherIdI64,
    SafeUserIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
