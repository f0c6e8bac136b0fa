use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::StudentNoteRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_student;

/// 学生更新备注
/// PUT /student/submissions/{id}/note
///
/// 备注独立于提交生命周期，任何状态下均可更新。
pub async fn handle_update_note(
    service: &SubmissionService,
    student_id: i64,
    submission_id: i64,
    note_request: StudentNoteRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_student(&storage, student_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 仅本人可更新备注，他人的提交视为不存在
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) if submission.student_id == student.id => submission,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    match storage
        .update_student_note(submission.id, note_request.student_note)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "备注已更新"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新备注失败: {e}"),
            )),
        ),
    }
}
