//! 成绩汇总
//!
//! 仅统计已评分的提交（score 非空）。未评分与未提交的记录不计入
//! 总分与满分合计。

use crate::models::submissions::responses::SubmissionDetail;

/// 成绩汇总结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub total: f64,
    pub max_total: f64,
}

/// 从提交列表汇总成绩
///
/// 没有任何已评分提交时返回 None。
pub fn aggregate_scores(details: &[SubmissionDetail]) -> Option<ScoreSummary> {
    let mut total = 0.0;
    let mut max_total = 0.0;
    let mut graded = false;

    for detail in details {
        let submission = &detail.submission;
        if let Some(score) = submission.score {
            total += score;
            max_total += submission.max_score.unwrap_or(0.0);
            graded = true;
        }
    }

    graded.then_some(ScoreSummary { total, max_total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::{Submission, SubmissionStatus};

    fn detail(score: Option<f64>, max_score: Option<f64>) -> SubmissionDetail {
        SubmissionDetail {
            submission: Submission {
                id: 1,
                assignment_id: 1,
                student_id: 1,
                status: if score.is_some() {
                    SubmissionStatus::Graded
                } else {
                    SubmissionStatus::Pending
                },
                submitted_at: None,
                score,
                max_score,
                teacher_note: None,
                student_note: None,
                answer: None,
            },
            assignment: None,
        }
    }

    #[test]
    fn test_no_graded_submissions_yields_none() {
        assert_eq!(aggregate_scores(&[]), None);
        assert_eq!(
            aggregate_scores(&[detail(None, Some(100.0)), detail(None, Some(50.0))]),
            None
        );
    }

    #[test]
    fn test_only_graded_rows_counted() {
        let details = vec![
            detail(Some(80.0), Some(100.0)),
            detail(None, Some(100.0)),
            detail(Some(45.0), Some(50.0)),
        ];
        let summary = aggregate_scores(&details).unwrap();
        assert_eq!(summary.total, 125.0);
        assert_eq!(summary.max_total, 150.0);
    }

    #[test]
    fn test_zero_score_still_counts_as_graded() {
        let summary = aggregate_scores(&[detail(Some(0.0), Some(100.0))]).unwrap();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.max_total, 100.0);
    }
}
