//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: String,
    pub submitted_at: Option<i64>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub teacher_note: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub student_note: Option<String>,
    // 答案字段：至多一列非空，与作业的提交类型对应
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
    pub selected_choice: Option<i32>,
    pub file_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{AnswerPayload, Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        let answer = if let Some(answer_text) = self.answer_text {
            Some(AnswerPayload::Text { answer_text })
        } else if let Some(selected_choice) = self.selected_choice {
            Some(AnswerPayload::MultipleChoice { selected_choice })
        } else {
            self.file_name.map(|file_name| AnswerPayload::File { file_name })
        };

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Pending),
            submitted_at: self
                .submitted_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            score: self.score,
            max_score: self.max_score,
            teacher_note: self.teacher_note,
            student_note: self.student_note,
            answer,
        }
    }
}
