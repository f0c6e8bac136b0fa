use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::submissions::requests::{StudentNoteRequest, SubmitAnswerRequest};
use crate::services::{ReportService, SubmissionService};

// 懒加载的全局服务实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

/// 学生端操作身份，经查询参数传递
#[derive(Debug, Deserialize)]
pub struct StudentIdQuery {
    pub student_id: i64,
}

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<StudentIdQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_for_student(query.student_id, &req)
        .await
}

pub async fn submit_answer(
    req: HttpRequest,
    query: web::Query<StudentIdQuery>,
    path: web::Path<i64>,
    submit_data: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(
            query.student_id,
            path.into_inner(),
            submit_data.into_inner(),
            &req,
        )
        .await
}

pub async fn update_note(
    req: HttpRequest,
    query: web::Query<StudentIdQuery>,
    path: web::Path<i64>,
    note_data: web::Json<StudentNoteRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_note(
            query.student_id,
            path.into_inner(),
            note_data.into_inner(),
            &req,
        )
        .await
}

pub async fn export_report(
    req: HttpRequest,
    query: web::Query<StudentIdQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.export_report(query.student_id, &req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .route("/assignments", web::get().to(list_assignments))
            .route(
                "/submissions/{assignment_id}/submit",
                web::post().to(submit_answer),
            )
            .route(
                "/submissions/{submission_id}/note",
                web::put().to(update_note),
            )
            .route("/export/report", web::get().to(export_report)),
    );
}
