use super::entities::AnswerPayload;
use serde::Deserialize;
use ts_rs::TS;

/// 学生提交答案请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitAnswerRequest {
    pub payload: AnswerPayload,
}

/// 教师评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub teacher_note: Option<String>,
}

/// 学生备注更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct StudentNoteRequest {
    pub student_note: String,
}
