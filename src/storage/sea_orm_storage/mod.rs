//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{PerfTrackError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PerfTrackError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PerfTrackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PerfTrackError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PerfTrackError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 基于内存 SQLite 的实例，用于单元测试
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PerfTrackError::database_config(format!("SQLite URL 解析失败: {e}")))?;

        // 内存库按连接隔离，池必须固定为单连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(opt)
            .await
            .map_err(|e| PerfTrackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        Migrator::up(&db, None)
            .await
            .map_err(|e| PerfTrackError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_id_and_role(&self, id: i64, role: UserRole) -> Result<Option<User>> {
        self.get_user_by_id_and_role_impl(id, role).await
    }

    async fn list_students(&self) -> Result<Vec<User>> {
        self.list_students_impl().await
    }

    // 作业模块
    async fn create_assignment_with_roster(
        &self,
        teacher_id: i64,
        request: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_with_roster_impl(teacher_id, request)
            .await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_teacher_impl(teacher_id).await
    }

    // 提交模块
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_for_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<SubmissionDetail>> {
        self.list_student_submissions_impl(student_id).await
    }

    async fn submit_answer(
        &self,
        submission_id: i64,
        payload: AnswerPayload,
    ) -> Result<Submission> {
        self.submit_answer_impl(submission_id, payload).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        teacher_note: Option<String>,
    ) -> Result<Submission> {
        self.grade_submission_impl(submission_id, score, teacher_note)
            .await
    }

    async fn update_student_note(
        &self,
        submission_id: i64,
        student_note: String,
    ) -> Result<Submission> {
        self.update_student_note_impl(submission_id, student_note)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::SubmissionType;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::Utc;

    async fn seed_teacher_and_students(
        storage: &SeaOrmStorage,
        student_count: usize,
    ) -> (User, Vec<User>) {
        let teacher = storage
            .create_user(CreateUserRequest {
                username: "teacher01".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Teacher,
                year: None,
            })
            .await
            .unwrap();

        let mut students = Vec::new();
        for i in 0..student_count {
            let student = storage
                .create_user(CreateUserRequest {
                    username: format!("student{i:02}"),
                    password: "hashed".to_string(),
                    role: UserRole::Student,
                    year: Some(2026),
                })
                .await
                .unwrap();
            students.push(student);
        }
        (teacher, students)
    }

    fn text_assignment_request(title: &str) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.to_string(),
            description: Some("阅读并作答".to_string()),
            due_date: Utc::now(),
            max_score: Some(50.0),
            weight: None,
            submission_type: None,
            question: None,
            choices: None,
        }
    }

    #[tokio::test]
    async fn test_roster_fanout_creates_pending_submission_per_student() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (teacher, students) = seed_teacher_and_students(&storage, 3).await;

        let assignment = storage
            .create_assignment_with_roster(teacher.id, text_assignment_request("第一次作业"))
            .await
            .unwrap();

        for student in &students {
            let submission = storage
                .get_submission_for_student(assignment.id, student.id)
                .await
                .unwrap()
                .expect("每个学生应有一条提交记录");
            assert_eq!(submission.status, SubmissionStatus::Pending);
            assert_eq!(submission.max_score, Some(50.0));
            assert!(submission.submitted_at.is_none());
            assert!(submission.answer.is_none());
        }
    }

    #[tokio::test]
    async fn test_submit_answer_sets_single_payload() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (teacher, students) = seed_teacher_and_students(&storage, 1).await;

        let assignment = storage
            .create_assignment_with_roster(teacher.id, text_assignment_request("作答练习"))
            .await
            .unwrap();

        let pending = storage
            .get_submission_for_student(assignment.id, students[0].id)
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

        assert_eq!(submitted.status, SubmissionStatus::Submitted);
        assert!(submitted.submitted_at.is_some());
        assert_eq!(
            submitted.answer,
            Some(AnswerPayload::Text {
                answer_text: "我的答案".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_mcq_choices_round_trip() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (teacher, students) = seed_teacher_and_students(&storage, 1).await;

        let assignment = storage
            .create_assignment_with_roster(
                teacher.id,
                CreateAssignmentRequest {
                    title: "选择题".to_string(),
                    description: None,
                    due_date: Utc::now(),
                    max_score: Some(10.0),
                    weight: None,
                    submission_type: Some(SubmissionType::MultipleChoice),
                    question: Some("选出正确项".to_string()),
                    choices: Some(vec!["A".into(), "B".into(), "C".into()]),
                },
            )
            .await
            .unwrap();

        let fetched = storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.submission_type, SubmissionType::MultipleChoice);
        assert_eq!(
            fetched.choices,
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );

        let pending = storage
            .get_submission_for_student(assignment.id, students[0].id)
            .await
            .unwrap()
            .unwrap();
        let submitted = storage
            .submit_answer(pending.id, AnswerPayload::MultipleChoice { selected_choice: 1 })
            .await
            .unwrap();
        assert_eq!(
            submitted.answer,
            Some(AnswerPayload::MultipleChoice { selected_choice: 1 })
        );
    }

    #[tokio::test]
    async fn test_grade_and_list_order() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (teacher, students) = seed_teacher_and_students(&storage, 1).await;
        let student = &students[0];

        let first = storage
            .create_assignment_with_roster(teacher.id, text_assignment_request("作业一"))
            .await
            .unwrap();
        let second = storage
            .create_assignment_with_roster(teacher.id, text_assignment_request("作业二"))
            .await
            .unwrap();

        let submission = storage
            .get_submission_for_student(first.id, student.id)
            .await
            .unwrap()
            .unwrap();
        storage
            .submit_answer(
                submission.id,
                AnswerPayload::Text {
                    answer_text: "答案".to_string(),
                },
            )
            .await
            .unwrap();
        let graded = storage
            .grade_submission(submission.id, 42.0, Some("不错".to_string()))
            .await
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.score, Some(42.0));
        assert_eq!(graded.teacher_note, Some("不错".to_string()));

        let listed = storage.list_student_submissions(student.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        // 提交ID升序，作业信息随行返回
        assert!(listed[0].submission.id < listed[1].submission.id);
        assert_eq!(
            listed[0].assignment.as_ref().map(|a| a.id),
            Some(first.id)
        );
        assert_eq!(
            listed[1].assignment.as_ref().map(|a| a.id),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn test_student_note_update_keeps_status() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let (teacher, students) = seed_teacher_and_students(&storage, 1).await;

        let assignment = storage
            .create_assignment_with_roster(teacher.id, text_assignment_request("备注测试"))
            .await
            .unwrap();
        let pending = storage
            .get_submission_for_student(assignment.id, students[0].id)
            .await
            .unwrap()
            .unwrap();

        let updated = storage
            .update_student_note(pending.id, "稍后补交".to_string())
            .await
            .unwrap();
        assert_eq!(updated.status, SubmissionStatus::Pending);
        assert_eq!(updated.student_note, Some("稍后补交".to_string()));
    }
}
