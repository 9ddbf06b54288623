//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tuition_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TuitionError {
            $($variant(String),)*
        }

        impl TuitionError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TuitionError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TuitionError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TuitionError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TuitionError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TuitionError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tuition_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Transaction("E004", "Transaction Error"),
    Validation("E005", "Validation Error"),
    ScheduleViolation("E006", "Schedule Violation"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Conflict Error"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    FileOperation("E011", "File Operation Error"),
    ClassNotFound("E012", "Class Not Found"),
    UserNotFound("E013", "User Not Found"),
    ClassClosed("E014", "Class Closed"),
    ClassFull("E015", "Class Full"),
    NotEnrolled("E016", "Student Not Enrolled"),
    DiscountRange("E017", "Discount Out Of Range"),
}

impl TuitionError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 课表/输入类错误不可通过重试解决，事务类错误可整体重试
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TuitionError::Transaction(_)
                | TuitionError::DatabaseOperation(_)
                | TuitionError::DatabaseConnection(_)
        )
    }
}

impl fmt::Display for TuitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TuitionError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TuitionError {
    fn from(err: sea_orm::DbErr) -> Self {
        TuitionError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TuitionError {
    fn from(err: std::io::Error) -> Self {
        TuitionError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TuitionError {
    fn from(err: serde_json::Error) -> Self {
        TuitionError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TuitionError {
    fn from(err: chrono::ParseError) -> Self {
        TuitionError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TuitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TuitionError::database_config("test").code(), "E001");
        assert_eq!(TuitionError::validation("test").code(), "E005");
        assert_eq!(TuitionError::schedule_violation("test").code(), "E006");
        assert_eq!(TuitionError::conflict("test").code(), "E008");
        assert_eq!(TuitionError::class_full("test").code(), "E015");
        assert_eq!(TuitionError::not_enrolled("test").code(), "E016");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TuitionError::schedule_violation("test").error_type(),
            "Schedule Violation"
        );
        assert_eq!(
            TuitionError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = TuitionError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_retryable() {
        assert!(TuitionError::transaction("aborted").is_retryable());
        assert!(!TuitionError::schedule_violation("Tuesday").is_retryable());
        assert!(!TuitionError::not_found("class 1").is_retryable());
    }

    #[test]
    fn test_format_simple() {
        let err = TuitionError::validation("Invalid discount");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid discount"));
    }
}
