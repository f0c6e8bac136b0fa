use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_teacher;

/// 教师查看自己创建的作业，按截止时间升序
/// GET /teacher/assignments
pub async fn handle_list_for_teacher(
    service: &AssignmentService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match resolve_teacher(&storage, teacher_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match storage.list_assignments_by_teacher(teacher.id).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}
