use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::services::{AssignmentService, SubmissionService};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

/// 教师端操作身份，经查询参数传递
#[derive(Debug, Deserialize)]
pub struct TeacherIdQuery {
    pub teacher_id: i64,
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<TeacherIdQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_students(query.teacher_id, &req)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    query: web::Query<TeacherIdQuery>,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create(query.teacher_id, assignment_data.into_inner(), &req)
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<TeacherIdQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_for_teacher(query.teacher_id, &req)
        .await
}

pub async fn list_student_submissions(
    req: HttpRequest,
    query: web::Query<TeacherIdQuery>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_for_teacher(query.teacher_id, path.into_inner(), &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    query: web::Query<TeacherIdQuery>,
    path: web::Path<i64>,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade(
            query.teacher_id,
            path.into_inner(),
            grade_data.into_inner(),
            &req,
        )
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .route("/students", web::get().to(list_students))
            .route("/assignments", web::post().to(create_assignment))
            .route("/assignments", web::get().to(list_assignments))
            .route(
                "/students/{student_id}/submissions",
                web::get().to(list_student_submissions),
            )
            .route(
                "/submissions/{submission_id}/grade",
                web::put().to(grade_submission),
            ),
    );
}
