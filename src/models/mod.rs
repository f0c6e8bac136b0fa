pub mod assignments;
pub mod auth;
pub mod common;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间（用于统计预处理耗时）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
///
/// 约定：0 表示成功；4xxyy 与 HTTP 状态码对应；5xxyy 为服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    ValidationFailed = 40001,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,

    NotFound = 40400,
    UserNotFound = 40401,
    AssignmentNotFound = 40402,
    SubmissionNotFound = 40403,

    Conflict = 40900,
    UserNameAlreadyExists = 40901,
    InvalidTransition = 40902,

    InternalServerError = 50000,
    RegisterFailed = 50001,
    ReportRenderFailed = 50002,
}
