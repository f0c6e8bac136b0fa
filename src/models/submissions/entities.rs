use crate::errors::{PerfTrackError, Result};
use crate::models::assignments::entities::SubmissionType;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,   // 待提交
    Submitted, // 已提交待批改
    Graded,    // 已评分（终态）
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";

    /// 报表中展示的状态标签
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Submitted => "Submitted",
            SubmissionStatus::Graded => "Graded",
        }
    }

    /// 学生提交前的状态校验
    ///
    /// 评分前允许重复提交（覆盖答案与提交时间）；已评分后提交被拒绝。
    pub fn ensure_can_submit(self) -> Result<()> {
        match self {
            SubmissionStatus::Pending | SubmissionStatus::Submitted => Ok(()),
            SubmissionStatus::Graded => Err(PerfTrackError::invalid_transition(
                "提交已评分，不允许再次提交",
            )),
        }
    }

    /// 教师评分前的状态校验
    ///
    /// 仅允许对已提交的记录评分；已评分为终态，重复评分被拒绝。
    pub fn ensure_can_grade(self) -> Result<()> {
        match self {
            SubmissionStatus::Submitted => Ok(()),
            SubmissionStatus::Pending => Err(PerfTrackError::invalid_transition(
                "提交尚未完成，不能评分",
            )),
            SubmissionStatus::Graded => Err(PerfTrackError::invalid_transition(
                "提交已评分，不允许重复评分",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, submitted, graded"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 答案载荷：与作业的提交类型一一对应的和类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum AnswerPayload {
    Text { answer_text: String },
    MultipleChoice { selected_choice: i32 },
    File { file_name: String },
}

impl AnswerPayload {
    /// 载荷是否与作业的提交类型匹配
    pub fn matches(&self, submission_type: SubmissionType) -> bool {
        matches!(
            (self, submission_type),
            (AnswerPayload::Text { .. }, SubmissionType::Text)
                | (
                    AnswerPayload::MultipleChoice { .. },
                    SubmissionType::MultipleChoice
                )
                | (AnswerPayload::File { .. }, SubmissionType::File)
        )
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub score: Option<f64>,
    /// 创建时从作业固化的满分，作业后续修改不影响已有记录
    pub max_score: Option<f64>,
    /// 评分时的教师评语
    pub teacher_note: Option<String>,
    /// 学生备注，任何状态下均可更新
    pub student_note: Option<String>,
    /// 与作业提交类型对应的答案，至多一个
    pub answer: Option<AnswerPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_and_submitted_can_submit() {
        assert!(SubmissionStatus::Pending.ensure_can_submit().is_ok());
        assert!(SubmissionStatus::Submitted.ensure_can_submit().is_ok());
    }

    #[test]
    fn test_graded_is_terminal() {
        assert!(SubmissionStatus::Graded.ensure_can_submit().is_err());
        assert!(SubmissionStatus::Graded.ensure_can_grade().is_err());
    }

    #[test]
    fn test_only_submitted_can_be_graded() {
        assert!(SubmissionStatus::Submitted.ensure_can_grade().is_ok());
        assert!(SubmissionStatus::Pending.ensure_can_grade().is_err());
    }

    #[test]
    fn test_payload_type_match() {
        let text = AnswerPayload::Text {
            answer_text: "x".into(),
        };
        assert!(text.matches(SubmissionType::Text));
        assert!(!text.matches(SubmissionType::MultipleChoice));
        assert!(!text.matches(SubmissionType::File));

        let choice = AnswerPayload::MultipleChoice { selected_choice: 1 };
        assert!(choice.matches(SubmissionType::MultipleChoice));
        assert!(!choice.matches(SubmissionType::Text));
    }

    #[test]
    fn test_payload_tagged_serialization() {
        let payload = AnswerPayload::MultipleChoice { selected_choice: 2 };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"multiple_choice\""));
        let back: AnswerPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
