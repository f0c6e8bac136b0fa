use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_teacher;

/// 创建作业
/// POST /teacher/assignments
pub async fn handle_create(
    service: &AssignmentService,
    teacher_id: i64,
    create_request: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match resolve_teacher(&storage, teacher_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = create_request.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            e.message(),
        )));
    }

    match storage
        .create_assignment_with_roster(teacher.id, create_request)
        .await
    {
        Ok(assignment) => {
            info!(
                "作业创建成功: id={}, 教师: {}",
                assignment.id, teacher.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}
