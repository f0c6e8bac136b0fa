use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    submissions::{
        entities::{AnswerPayload, Submission},
        responses::SubmissionDetail,
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过ID与角色获取用户，角色不匹配视为不存在
    async fn get_user_by_id_and_role(&self, id: i64, role: UserRole) -> Result<Option<User>>;
    // 列出全部学生
    async fn list_students(&self) -> Result<Vec<User>>;

    /// 作业管理方法
    // 创建作业并为花名册中每个学生生成待提交记录（单事务）
    async fn create_assignment_with_roster(
        &self,
        teacher_id: i64,
        request: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出某教师创建的作业，按截止时间升序
    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取某学生在某作业下的提交
    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出某学生的全部提交（附作业信息），按提交ID升序
    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<SubmissionDetail>>;
    // 学生提交答案，覆盖旧答案并刷新提交时间
    async fn submit_answer(
        &self,
        submission_id: i64,
        payload: AnswerPayload,
    ) -> Result<Submission>;
    // 教师评分
    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        teacher_note: Option<String>,
    ) -> Result<Submission>;
    // 更新学生备注
    async fn update_student_note(
        &self,
        submission_id: i64,
        student_note: String,
    ) -> Result<Submission>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
