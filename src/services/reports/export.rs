use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ReportService;
use super::render::{build_report, render_xlsx};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::resolve_student;

/// 学生导出成绩报表
/// GET /student/export/report
pub async fn handle_export_report(
    service: &ReportService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_student(&storage, student_id).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let details = match storage.list_student_submissions(student.id).await {
        Ok(details) => details,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交列表失败: {e}"),
                )),
            );
        }
    };

    let document = build_report(&student, &details);

    match render_xlsx(&document) {
        Ok(buffer) => {
            // 文件名不带时间戳，同一学生同一数据导出结果一致
            let filename = format!("grades_{}.xlsx", student.username);

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("生成 XLSX 失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ReportRenderFailed,
                    format!("生成报表失败: {e}"),
                )),
            )
        }
    }
}
