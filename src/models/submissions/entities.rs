use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{AcademyError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::common::AttachmentInfo;

/// 成绩下限
pub const MIN_SCORE: f64 = 0.0;
/// 成绩上限
pub const MAX_SCORE: f64 = 10.0;

// 提交状态（未提交即不存在记录）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Submitted, // 按时提交
    Late,      // 逾期提交
    Graded,    // 已评分
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "submitted";
    pub const LATE: &'static str = "late";
    pub const GRADED: &'static str = "graded";

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => Self::SUBMITTED,
            SubmissionStatus::Late => Self::LATE,
            SubmissionStatus::Graded => Self::GRADED,
        }
    }

    /// 创建或上传附件时的状态：事件日期严格晚于截止日期即为逾期
    pub fn for_event(event_date: NaiveDate, due_date: Option<NaiveDate>) -> Self {
        match due_date {
            Some(due) if event_date > due => SubmissionStatus::Late,
            _ => SubmissionStatus::Submitted,
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, late, graded"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::SUBMITTED => Ok(SubmissionStatus::Submitted),
            Self::LATE => Ok(SubmissionStatus::Late),
            Self::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 事件发生的自然日（UTC）
pub fn event_date(now: chrono::DateTime<chrono::Utc>) -> NaiveDate {
    now.date_naive()
}

/// 成绩必须落在 [0, 10] 区间内
pub fn validate_score(score: f64) -> Result<()> {
    if score.is_nan() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AcademyError::validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

// 提交实体（不含附件内容）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    // 最近一次创建/上传附件的时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub attachment: Option<AttachmentInfo>,
    pub score: Option<f64>,
    pub comments: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn is_owned_by_student(&self, student_id: i64) -> bool {
        self.student_id == student_id
    }

    pub fn is_owned_by_teacher_of_assignment(&self, assignment: &Assignment, teacher_id: i64) -> bool {
        assignment.id == self.assignment_id && assignment.is_owned_by_teacher(teacher_id)
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.as_ref().is_some_and(|a| a.size > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_late_only_after_due_date() {
        let due = Some(date(2025, 1, 10));
        assert_eq!(
            SubmissionStatus::for_event(date(2025, 1, 9), due),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            SubmissionStatus::for_event(date(2025, 1, 10), due),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            SubmissionStatus::for_event(date(2025, 1, 11), due),
            SubmissionStatus::Late
        );
        assert_eq!(
            SubmissionStatus::for_event(date(2030, 1, 1), None),
            SubmissionStatus::Submitted
        );
    }

    #[test]
    fn test_same_day_late_evening_is_not_late() {
        let now = "2025-01-10T23:59:59Z".parse().unwrap();
        assert_eq!(
            SubmissionStatus::for_event(event_date(now), Some(date(2025, 1, 10))),
            SubmissionStatus::Submitted
        );
    }

    #[test]
    fn test_score_range() {
        for ok in [0.0, 7.5, 10.0] {
            assert!(validate_score(ok).is_ok());
        }
        for bad in [-0.1, 10.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(validate_score(bad), Err(AcademyError::Validation(_))));
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("late".parse::<SubmissionStatus>().unwrap(), SubmissionStatus::Late);
        assert!("pending".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_ownership_predicates() {
        let now = chrono::Utc::now();
        let assignment = Assignment {
            id: 4,
            course_id: 1,
            teacher_id: 2,
            name: "Quiz".to_string(),
            description: None,
            publish_date: date(2025, 1, 1),
            due_date: None,
            for_all_students: true,
            student_ids: vec![],
            attachment: None,
            created_at: now,
            updated_at: now,
        };
        let submission = Submission {
            id: 1,
            assignment_id: 4,
            student_id: 9,
            status: SubmissionStatus::Submitted,
            submitted_at: now,
            attachment: None,
            score: None,
            comments: None,
            graded_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(submission.is_owned_by_student(9));
        assert!(!submission.is_owned_by_student(10));
        assert!(submission.is_owned_by_teacher_of_assignment(&assignment, 2));
        assert!(!submission.is_owned_by_teacher_of_assignment(&assignment, 3));
        assert!(!submission.has_attachment());
    }
}
