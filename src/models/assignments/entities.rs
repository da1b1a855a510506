use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::AttachmentInfo;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    // 所属课程
    pub course_id: i64,
    // 布置作业的教师
    pub teacher_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub publish_date: NaiveDate,
    // 截止日期（按自然日比较）
    pub due_date: Option<NaiveDate>,
    // 为 true 时面向课程全部学生，否则仅面向 student_ids
    pub for_all_students: bool,
    pub student_ids: Vec<i64>,
    pub attachment: Option<AttachmentInfo>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_owned_by_teacher(&self, teacher_id: i64) -> bool {
        self.teacher_id == teacher_id
    }

    /// 学生是否为该作业的提交对象
    pub fn accepts_student(&self, student_id: i64, enrolled_in_course: bool) -> bool {
        if self.for_all_students {
            enrolled_in_course
        } else {
            self.student_ids.contains(&student_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(for_all_students: bool, student_ids: Vec<i64>) -> Assignment {
        let now = chrono::Utc::now();
        Assignment {
            id: 1,
            course_id: 1,
            teacher_id: 7,
            name: "Essay".to_string(),
            description: None,
            publish_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            for_all_students,
            student_ids,
            attachment: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_for_all_students_follows_enrollment() {
        let a = assignment(true, vec![]);
        assert!(a.accepts_student(3, true));
        assert!(!a.accepts_student(3, false));
    }

    #[test]
    fn test_explicit_targets_only() {
        let a = assignment(false, vec![3]);
        assert!(a.accepts_student(3, true));
        assert!(!a.accepts_student(4, true));
    }

    #[test]
    fn test_owner() {
        let a = assignment(true, vec![]);
        assert!(a.is_owned_by_teacher(7));
        assert!(!a.is_owned_by_teacher(8));
    }
}
