//! 成绩报表渲染
//!
//! 先构建结构化的报表文档，再序列化为 XLSX。文档内容只由输入数据
//! 决定，文件元数据中的创建时间固定，同一数据渲染结果逐字节一致。

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use super::aggregate::aggregate_scores;
use crate::errors::{PerfTrackError, Result};
use crate::models::submissions::responses::SubmissionDetail;
use crate::models::users::entities::User;

/// 报表行，列序与表头一致
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub index: usize,
    pub assignment_title: String,
    pub submission_type: String,
    pub due_date: String,
    pub status: String,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub teacher_note: Option<String>,
}

/// 结构化的报表文档
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub student_username: String,
    pub rows: Vec<ReportRow>,
    pub summary_line: String,
}

const REPORT_HEADERS: [&str; 8] = [
    "#",
    "Assignment",
    "Type",
    "Due Date",
    "Status",
    "Score",
    "Max Score",
    "Teacher Note",
];

/// 从提交列表构建报表文档，行序沿用输入顺序（提交 ID 升序）
pub fn build_report(student: &User, details: &[SubmissionDetail]) -> ReportDocument {
    let rows = details
        .iter()
        .enumerate()
        .map(|(i, detail)| {
            let submission = &detail.submission;
            let (title, submission_type, due_date) = match &detail.assignment {
                Some(assignment) => (
                    assignment.title.clone(),
                    assignment.submission_type.label().to_string(),
                    assignment.due_date.format("%d/%m/%Y").to_string(),
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };

            ReportRow {
                index: i + 1,
                assignment_title: title,
                submission_type,
                due_date,
                status: submission.status.label().to_string(),
                score: submission.score,
                max_score: submission.max_score,
                teacher_note: submission.teacher_note.clone(),
            }
        })
        .collect();

    let summary_line = match aggregate_scores(details) {
        Some(summary) => format!(
            "Total Score: {:.1} / {:.1}",
            summary.total, summary.max_total
        ),
        None => "Total Score: N/A".to_string(),
    };

    ReportDocument {
        student_username: student.username.clone(),
        rows,
        summary_line,
    }
}

/// 将报表文档序列化为 XLSX
pub fn render_xlsx(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // 创建时间固定，保证同一数据输出逐字节一致
    let creation = ExcelDateTime::from_ymd(2024, 1, 1)
        .map_err(|e| PerfTrackError::report_render(e.to_string()))?;
    let properties = DocProperties::new().set_creation_datetime(&creation);
    workbook.set_properties(&properties);

    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    let sheet = workbook
        .add_worksheet()
        .set_name("Grade Report")
        .map_err(|e| PerfTrackError::report_render(e.to_string()))?;

    // 标题
    sheet
        .write_string_with_format(
            0,
            0,
            format!("Grade Report: {}", document.student_username),
            &title_format,
        )
        .map_err(|e| PerfTrackError::report_render(e.to_string()))?;

    // 表头
    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(2, col as u16, *header, &header_format)
            .map_err(|e| PerfTrackError::report_render(e.to_string()))?;
    }

    // 数据行
    for (i, report_row) in document.rows.iter().enumerate() {
        let row = (i + 3) as u32;

        sheet.write_number(row, 0, report_row.index as f64).ok();
        sheet.write_string(row, 1, &report_row.assignment_title).ok();
        sheet.write_string(row, 2, &report_row.submission_type).ok();
        sheet.write_string(row, 3, &report_row.due_date).ok();
        sheet.write_string(row, 4, &report_row.status).ok();

        if let Some(score) = report_row.score {
            sheet.write_number(row, 5, score).ok();
        } else {
            sheet.write_string(row, 5, "-").ok();
        }

        if let Some(max_score) = report_row.max_score {
            sheet.write_number(row, 6, max_score).ok();
        } else {
            sheet.write_string(row, 6, "-").ok();
        }

        match &report_row.teacher_note {
            Some(note) => sheet.write_string(row, 7, note).ok(),
            None => sheet.write_string(row, 7, "-").ok(),
        };
    }

    // 汇总行，与表格隔一行
    let summary_row = (document.rows.len() + 4) as u32;
    sheet
        .write_string_with_format(summary_row, 0, &document.summary_line, &header_format)
        .map_err(|e| PerfTrackError::report_render(e.to_string()))?;

    // 设置列宽
    sheet.set_column_width(0, 5).ok();
    sheet.set_column_width(1, 30).ok();
    sheet.set_column_width(2, 15).ok();
    sheet.set_column_width(3, 12).ok();
    sheet.set_column_width(4, 12).ok();
    sheet.set_column_width(5, 10).ok();
    sheet.set_column_width(6, 10).ok();
    sheet.set_column_width(7, 30).ok();

    workbook
        .save_to_buffer()
        .map_err(|e| PerfTrackError::report_render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::{Assignment, SubmissionType};
    use crate::models::submissions::entities::{Submission, SubmissionStatus};
    use crate::models::users::entities::UserRole;
    use chrono::{TimeZone, Utc};

    fn student() -> User {
        User {
            id: 7,
            username: "student01".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            year: Some(2026),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn detail(
        id: i64,
        title: &str,
        status: SubmissionStatus,
        score: Option<f64>,
        max_score: f64,
    ) -> SubmissionDetail {
        SubmissionDetail {
            submission: Submission {
                id,
                assignment_id: id,
                student_id: 7,
                status,
                submitted_at: None,
                score,
                max_score: Some(max_score),
                teacher_note: None,
                student_note: None,
                answer: None,
            },
            assignment: Some(Assignment {
                id,
                title: title.to_string(),
                description: None,
                due_date: Utc.with_ymd_and_hms(2026, 1, 24, 12, 0, 0).unwrap(),
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                teacher_id: 1,
                weight: 100.0,
                max_score,
                submission_type: SubmissionType::Text,
                question: None,
                choices: None,
            }),
        }
    }

    #[test]
    fn test_summary_line_formatting() {
        let details = vec![
            detail(1, "作业一", SubmissionStatus::Graded, Some(80.0), 100.0),
            detail(2, "作业二", SubmissionStatus::Pending, None, 100.0),
        ];
        let document = build_report(&student(), &details);
        assert_eq!(document.summary_line, "Total Score: 80.0 / 100.0");
        // 未评分行没有分数，满分沿用创建时固化的值
        assert!(document.rows[1].score.is_none());
        assert_eq!(document.rows[1].max_score, Some(100.0));
    }

    #[test]
    fn test_summary_na_without_grades() {
        let document = build_report(&student(), &[]);
        assert_eq!(document.summary_line, "Total Score: N/A");
    }

    #[test]
    fn test_due_date_uses_day_month_year() {
        let details = vec![detail(1, "作业一", SubmissionStatus::Pending, None, 100.0)];
        let document = build_report(&student(), &details);
        assert_eq!(document.rows[0].due_date, "24/01/2026");
    }

    #[test]
    fn test_rows_keep_input_order() {
        let details = vec![
            detail(1, "作业一", SubmissionStatus::Graded, Some(10.0), 10.0),
            detail(2, "作业二", SubmissionStatus::Submitted, None, 10.0),
            detail(3, "作业三", SubmissionStatus::Pending, None, 10.0),
        ];
        let document = build_report(&student(), &details);
        assert_eq!(document.rows.len(), 3);
        assert_eq!(document.rows[0].index, 1);
        assert_eq!(document.rows[0].assignment_title, "作业一");
        assert_eq!(document.rows[2].assignment_title, "作业三");
        assert_eq!(document.rows[1].status, "Submitted");
    }

    #[test]
    fn test_render_is_reproducible() {
        let details = vec![
            detail(1, "作业一", SubmissionStatus::Graded, Some(80.0), 100.0),
            detail(2, "作业二", SubmissionStatus::Submitted, None, 50.0),
        ];
        let document = build_report(&student(), &details);
        let first = render_xlsx(&document).unwrap();
        let second = render_xlsx(&document).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
