use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionType {
    Text,           // 文本作答
    MultipleChoice, // 单选题
    File,           // 文件提交（仅记录文件名引用）
}

impl SubmissionType {
    pub const TEXT: &'static str = "text";
    pub const MULTIPLE_CHOICE: &'static str = "multiple_choice";
    pub const FILE: &'static str = "file";

    /// 报表中展示的类型标签
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionType::Text => "Text",
            SubmissionType::MultipleChoice => "Multiple Choice",
            SubmissionType::File => "File",
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionType::TEXT => Ok(SubmissionType::Text),
            SubmissionType::MULTIPLE_CHOICE => Ok(SubmissionType::MultipleChoice),
            SubmissionType::FILE => Ok(SubmissionType::File),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交类型: '{s}'. 支持的类型: text, multiple_choice, file"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Text => write!(f, "{}", SubmissionType::TEXT),
            SubmissionType::MultipleChoice => write!(f, "{}", SubmissionType::MULTIPLE_CHOICE),
            SubmissionType::File => write!(f, "{}", SubmissionType::FILE),
        }
    }
}

impl std::str::FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SubmissionType::Text),
            "multiple_choice" => Ok(SubmissionType::MultipleChoice),
            "file" => Ok(SubmissionType::File),
            _ => Err(format!("Invalid submission type: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub teacher_id: i64,
    /// 聚合权重（保留字段，当前不参与任何计算）
    pub weight: f64,
    /// 满分，创建提交记录时固化到每条提交上
    pub max_score: f64,
    pub submission_type: SubmissionType,
    /// 题干
    pub question: Option<String>,
    /// 单选题的有序选项列表
    pub choices: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_type_round_trip() {
        assert_eq!(
            "multiple_choice".parse::<SubmissionType>().unwrap(),
            SubmissionType::MultipleChoice
        );
        assert_eq!(SubmissionType::MultipleChoice.to_string(), "multiple_choice");
        assert!("essay".parse::<SubmissionType>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SubmissionType::Text.label(), "Text");
        assert_eq!(SubmissionType::MultipleChoice.label(), "Multiple Choice");
        assert_eq!(SubmissionType::File.label(), "File");
    }
}
