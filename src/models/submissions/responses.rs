use super::entities::Submission;
use crate::models::assignments::entities::Assignment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 提交详情（附带所属作业）
///
/// 作业可能已被删除，故为 Option。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub assignment: Option<Assignment>,
}
