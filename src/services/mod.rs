pub mod assignments;
pub mod auth;
pub mod reports;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use reports::ReportService;
pub use submissions::SubmissionService;

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 解析请求中的教师身份
///
/// 用户不存在或角色不是教师时返回 403。
pub(crate) async fn resolve_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<User, HttpResponse> {
    match storage
        .get_user_by_id_and_role(teacher_id, UserRole::Teacher)
        .await
    {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Teacher not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询用户失败: {e}"),
            )),
        ),
    }
}

/// 解析请求中的学生身份
pub(crate) async fn resolve_student(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<User, HttpResponse> {
    match storage
        .get_user_by_id_and_role(student_id, UserRole::Student)
        .await
    {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Student not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询用户失败: {e}"),
            )),
        ),
    }
}
