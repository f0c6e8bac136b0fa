use super::SeaOrmStorage;
use crate::entity::{assignments, submissions};
use crate::errors::{PerfTrackError, Result};
use crate::models::submissions::{
    entities::{AnswerPayload, Submission, SubmissionStatus},
    responses::SubmissionDetail,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = submissions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生在某作业下的提交
    pub async fn get_submission_for_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = submissions::Entity::find()
            .filter(submissions::Column::AssignmentId.eq(assignment_id))
            .filter(submissions::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某学生的全部提交及所属作业，按提交 ID 升序
    ///
    /// 升序保证同一数据下报表行序稳定。
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<SubmissionDetail>> {
        let rows = submissions::Entity::find()
            .filter(submissions::Column::StudentId.eq(student_id))
            .order_by_asc(submissions::Column::Id)
            .find_also_related(assignments::Entity)
            .all(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(submission, assignment)| SubmissionDetail {
                submission: submission.into_submission(),
                assignment: assignment.map(|m| m.into_assignment()),
            })
            .collect())
    }

    /// 学生提交答案
    ///
    /// 三个答案列先全部清空再写入其一，保证至多一列非空。
    pub async fn submit_answer_impl(
        &self,
        submission_id: i64,
        payload: AnswerPayload,
    ) -> Result<Submission> {
        let model = submissions::Entity::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| {
                PerfTrackError::not_found(format!("提交不存在: {submission_id}"))
            })?;

        let mut active = model.into_active_model();
        active.answer_text = Set(None);
        active.selected_choice = Set(None);
        active.file_name = Set(None);
        match payload {
            AnswerPayload::Text { answer_text } => active.answer_text = Set(Some(answer_text)),
            AnswerPayload::MultipleChoice { selected_choice } => {
                active.selected_choice = Set(Some(selected_choice))
            }
            AnswerPayload::File { file_name } => active.file_name = Set(Some(file_name)),
        }
        active.status = Set(SubmissionStatus::Submitted.to_string());
        active.submitted_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 教师评分
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        score: f64,
        teacher_note: Option<String>,
    ) -> Result<Submission> {
        let model = submissions::Entity::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| {
                PerfTrackError::not_found(format!("提交不存在: {submission_id}"))
            })?;

        let mut active = model.into_active_model();
        active.score = Set(Some(score));
        active.teacher_note = Set(teacher_note);
        active.status = Set(SubmissionStatus::Graded.to_string());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("更新评分失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 更新学生备注，不影响状态
    pub async fn update_student_note_impl(
        &self,
        submission_id: i64,
        student_note: String,
    ) -> Result<Submission> {
        let model = submissions::Entity::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| {
                PerfTrackError::not_found(format!("提交不存在: {submission_id}"))
            })?;

        let mut active = model.into_active_model();
        active.student_note = Set(Some(student_note));

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("更新备注失败: {e}")))?;

        Ok(result.into_submission())
    }
}
