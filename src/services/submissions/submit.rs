use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::AnswerPayload;
use crate::models::submissions::requests::SubmitAnswerRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_student;

/// 学生提交答案
/// POST /student/submissions/{assignment_id}/submit
pub async fn handle_submit(
    service: &SubmissionService,
    student_id: i64,
    assignment_id: i64,
    submit_request: SubmitAnswerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_student(&storage, student_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    let submission = match storage
        .get_submission_for_student(assignment_id, student.id)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交记录不存在",
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

    // 已评分为终态，提交被拒绝
    if let Err(e) = submission.status.ensure_can_submit() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            e.message(),
        )));
    }

    if let Err(resp) = validate_payload(&submit_request.payload, &assignment) {
        return Ok(resp);
    }

    match storage
        .submit_answer(submission.id, submit_request.payload)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "提交成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交失败: {e}"),
            )),
        ),
    }
}

/// 校验答案与作业提交类型匹配，单选题附带选项越界检查
fn validate_payload(payload: &AnswerPayload, assignment: &Assignment) -> Result<(), HttpResponse> {
    if !payload.matches(assignment.submission_type) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!(
                "答案类型与作业提交类型不匹配，该作业要求: {}",
                assignment.submission_type.label()
            ),
        )));
    }

    if let AnswerPayload::MultipleChoice { selected_choice } = payload {
        let choice_count = assignment.choices.as_ref().map_or(0, |c| c.len());
        if *selected_choice < 0 || *selected_choice as usize >= choice_count {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("所选选项越界: {selected_choice}, 选项总数: {choice_count}"),
            )));
        }
    }

    Ok(())
}
