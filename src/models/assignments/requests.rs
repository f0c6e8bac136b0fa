use super::entities::SubmissionType;
use crate::errors::{PerfTrackError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub max_score: Option<f64>,
    pub weight: Option<f64>,
    pub submission_type: Option<SubmissionType>,
    pub question: Option<String>,
    pub choices: Option<Vec<String>>,
}

impl CreateAssignmentRequest {
    pub fn effective_max_score(&self) -> f64 {
        self.max_score.unwrap_or(100.0)
    }

    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(100.0)
    }

    pub fn effective_submission_type(&self) -> SubmissionType {
        self.submission_type.unwrap_or(SubmissionType::Text)
    }

    /// 校验请求字段之间的约束
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PerfTrackError::validation("作业标题不能为空"));
        }

        if self.effective_max_score() <= 0.0 {
            return Err(PerfTrackError::validation("满分必须为正数"));
        }

        // 单选题必须携带非空选项列表
        if self.effective_submission_type() == SubmissionType::MultipleChoice {
            match &self.choices {
                Some(choices) if !choices.is_empty() => {}
                _ => {
                    return Err(PerfTrackError::validation(
                        "单选题作业必须提供非空的选项列表",
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: "第一次作业".to_string(),
            description: None,
            due_date: Utc::now(),
            max_score: None,
            weight: None,
            submission_type: None,
            question: None,
            choices: None,
        }
    }

    #[test]
    fn test_defaults() {
        let req = base_request();
        assert_eq!(req.effective_max_score(), 100.0);
        assert_eq!(req.effective_weight(), 100.0);
        assert_eq!(req.effective_submission_type(), SubmissionType::Text);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_mcq_requires_choices() {
        let mut req = base_request();
        req.submission_type = Some(SubmissionType::MultipleChoice);
        assert!(req.validate().is_err());

        req.choices = Some(vec![]);
        assert!(req.validate().is_err());

        req.choices = Some(vec!["A".into(), "B".into(), "C".into()]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut req = base_request();
        req.title = "   ".to_string();
        assert!(req.validate().is_err());
    }
}
