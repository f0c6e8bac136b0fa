use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{resolve_student, resolve_teacher};
use crate::storage::Storage;

/// 学生查看自己的提交列表（附作业信息）
/// GET /student/assignments
pub async fn handle_list_for_student(
    service: &SubmissionService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_student(&storage, student_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    list_submissions(&storage, student.id).await
}

/// 教师查看某学生的提交列表
/// GET /teacher/students/{student_id}/submissions
pub async fn handle_list_for_teacher(
    service: &SubmissionService,
    teacher_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = resolve_teacher(&storage, teacher_id).await {
        return Ok(resp);
    }

    // 目标学生不存在时返回 404
    match storage
        .get_user_by_id_and_role(student_id, crate::models::users::entities::UserRole::Student)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    list_submissions(&storage, student_id).await
}

async fn list_submissions(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    match storage.list_student_submissions(student_id).await {
        Ok(submissions) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submissions, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}
