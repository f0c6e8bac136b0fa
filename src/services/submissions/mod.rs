pub mod grade;
pub mod list;
pub mod note;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    GradeSubmissionRequest, StudentNoteRequest, SubmitAnswerRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生提交答案
    pub async fn submit(
        &self,
        student_id: i64,
        assignment_id: i64,
        submit_request: SubmitAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, student_id, assignment_id, submit_request, request).await
    }

    // 教师评分
    pub async fn grade(
        &self,
        teacher_id: i64,
        submission_id: i64,
        grade_request: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade(self, teacher_id, submission_id, grade_request, request).await
    }

    // 学生更新备注
    pub async fn update_note(
        &self,
        student_id: i64,
        submission_id: i64,
        note_request: StudentNoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        note::handle_update_note(self, student_id, submission_id, note_request, request).await
    }

    // 学生查看自己的提交列表
    pub async fn list_for_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_for_student(self, student_id, request).await
    }

    // 教师查看某学生的提交列表
    pub async fn list_for_teacher(
        &self,
        teacher_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_for_teacher(self, teacher_id, student_id, request).await
    }
}
