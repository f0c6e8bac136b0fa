use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column};
use crate::entity::prelude::Assignments;
use crate::entity::{submissions, users};
use crate::errors::{PerfTrackError, Result};
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    submissions::entities::SubmissionStatus,
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业并为全部学生生成待提交记录
    ///
    /// 作业插入与花名册展开在同一事务内完成，任一失败则整体回滚，
    /// 不会出现作业存在但部分学生缺少提交记录的中间状态。
    pub async fn create_assignment_with_roster_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let max_score = req.effective_max_score();
        let weight = req.effective_weight();
        let submission_type = req.effective_submission_type();

        let choices = match &req.choices {
            Some(choices) => Some(serde_json::to_string(choices).map_err(|e| {
                PerfTrackError::serialization(format!("选项列表序列化失败: {e}"))
            })?),
            None => None,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            created_at: Set(now),
            teacher_id: Set(teacher_id),
            weight: Set(weight),
            max_score: Set(max_score),
            submission_type: Set(submission_type.to_string()),
            question: Set(req.question),
            choices: Set(choices),
            ..Default::default()
        };

        let assignment = model
            .insert(&txn)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("创建作业失败: {e}")))?;

        // 事务内取学生快照，满分随记录固化
        let students = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::STUDENT))
            .all(&txn)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询学生列表失败: {e}")))?;

        for student in &students {
            let pending = submissions::ActiveModel {
                assignment_id: Set(assignment.id),
                student_id: Set(student.id),
                status: Set(SubmissionStatus::Pending.to_string()),
                max_score: Set(Some(max_score)),
                ..Default::default()
            };
            pending.insert(&txn).await.map_err(|e| {
                PerfTrackError::database_operation(format!("创建待提交记录失败: {e}"))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(assignment.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出某教师创建的作业，按截止时间升序
    pub async fn list_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }
}
