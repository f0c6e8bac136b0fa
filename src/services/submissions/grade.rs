use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_teacher;

/// 教师评分
/// PUT /teacher/submissions/{id}/grade
///
/// 任何教师都可评分，不限定作业创建者。
pub async fn handle_grade(
    service: &SubmissionService,
    teacher_id: i64,
    submission_id: i64,
    grade_request: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match resolve_teacher(&storage, teacher_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
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

    // 仅已提交状态可评分，评分后为终态
    if let Err(e) = submission.status.ensure_can_grade() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            e.message(),
        )));
    }

    // 分数不限制在满分以内，允许附加分
    match storage
        .grade_submission(submission.id, grade_request.score, grade_request.teacher_note)
        .await
    {
        Ok(graded) => {
            info!(
                "评分完成: submission_id={}, 分数: {}, 教师: {}",
                graded.id, grade_request.score, teacher.username
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "评分成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评分失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::submissions::entities::{AnswerPayload, SubmissionStatus};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use std::sync::Arc;

    // 教师 + 一名学生 + 一条已提交记录，返回 (teacher_id, submission_id)
    async fn seed_submitted(storage: &Arc<dyn Storage>) -> (i64, i64) {
        let teacher = storage
            .create_user(CreateUserRequest {
                username: "teacher01".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Teacher,
                year: None,
            })
            .await
            .unwrap();
        let student = storage
            .create_user(CreateUserRequest {
                username: "student01".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Student,
                year: Some(2026),
            })
            .await
            .unwrap();

        let assignment = storage
            .create_assignment_with_roster(
                teacher.id,
                CreateAssignmentRequest {
                    title: "评分练习".to_string(),
                    description: None,
                    due_date: Utc::now(),
                    max_score: Some(100.0),
                    weight: None,
                    submission_type: None,
                    question: None,
                    choices: None,
                },
            )
            .await
            .unwrap();

        let pending = storage
            .get_submission_for_student(assignment.id, student.id)
            .await
            .unwrap()
            .unwrap();
        let submitted = storage
            .submit_answer(
                pending.id,
                AnswerPayload::Text {
                    answer_text: "我的答案".to_string(),
                },
            )
            .await
            .unwrap();
        (teacher.id, submitted.id)
    }

    fn grade_request(score: f64) -> GradeSubmissionRequest {
        GradeSubmissionRequest {
            score,
            teacher_note: None,
        }
    }

    #[tokio::test]
    async fn test_second_grade_rejected_and_score_unchanged() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let service = SubmissionService {
            storage: Some(storage.clone()),
        };
        let request = TestRequest::default().to_http_request();
        let (teacher_id, submission_id) = seed_submitted(&storage).await;

        let resp = handle_grade(&service, teacher_id, submission_id, grade_request(90.0), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // 已评分为终态，重复评分被拒绝且分数不变
        let resp = handle_grade(&service, teacher_id, submission_id, grade_request(70.0), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let graded = storage
            .get_submission_by_id(submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.score, Some(90.0));
    }

    #[tokio::test]
    async fn test_grade_accepts_score_above_max() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let service = SubmissionService {
            storage: Some(storage.clone()),
        };
        let request = TestRequest::default().to_http_request();
        let (teacher_id, submission_id) = seed_submitted(&storage).await;

        // 附加分：分数可以超过固化的满分
        let resp = handle_grade(&service, teacher_id, submission_id, grade_request(110.0), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let graded = storage
            .get_submission_by_id(submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.score, Some(110.0));
        assert_eq!(graded.max_score, Some(100.0));
    }
}
