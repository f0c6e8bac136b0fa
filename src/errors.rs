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
macro_rules! define_perftrack_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PerfTrackError {
            $($variant(String),)*
        }

        impl PerfTrackError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PerfTrackError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PerfTrackError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PerfTrackError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PerfTrackError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PerfTrackError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_perftrack_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Forbidden("E006", "Forbidden"),
    InvalidTransition("E007", "Invalid Lifecycle Transition"),
    Conflict("E008", "Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    ReportRender("E011", "Report Render Error"),
}

impl PerfTrackError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PerfTrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PerfTrackError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PerfTrackError {
    fn from(err: sea_orm::DbErr) -> Self {
        PerfTrackError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PerfTrackError {
    fn from(err: std::io::Error) -> Self {
        PerfTrackError::DatabaseConnection(err.to_string())
    }
}

impl From<serde_json::Error> for PerfTrackError {
    fn from(err: serde_json::Error) -> Self {
        PerfTrackError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PerfTrackError {
    fn from(err: chrono::ParseError) -> Self {
        PerfTrackError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PerfTrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PerfTrackError::database_config("test").code(), "E001");
        assert_eq!(PerfTrackError::validation("test").code(), "E004");
        assert_eq!(PerfTrackError::invalid_transition("test").code(), "E007");
        assert_eq!(PerfTrackError::conflict("test").code(), "E008");
        assert_eq!(PerfTrackError::report_render("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PerfTrackError::invalid_transition("test").error_type(),
            "Invalid Lifecycle Transition"
        );
        assert_eq!(
            PerfTrackError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PerfTrackError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = PerfTrackError::not_found("Submission 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Submission 42"));
    }
}
