//! 资源级访问规则
//!
//! 角色集合由路由上的 RequireRole 检查；这里处理需要结合资源归属判断的情况。

use crate::errors::{AcademyError, Result};
use crate::models::{
    accounts::entities::{Account, AccountProfile},
    assignments::entities::Assignment,
    submissions::entities::Submission,
};
use crate::storage::Storage;

fn forbidden(account: &Account, what: &str) -> AcademyError {
    tracing::info!(
        "Account {} ({}) denied access to {}",
        account.id,
        account.role(),
        what
    );
    AcademyError::authorization(format!("You do not have access to {what}"))
}

/// 管理员或档案本人
pub fn ensure_self_or_admin(account: &Account, profile: AccountProfile) -> Result<()> {
    if account.is_admin() || account.profile == profile {
        Ok(())
    } else {
        Err(forbidden(account, "this profile"))
    }
}

/// 管理员或作业布置者
pub fn ensure_can_manage_assignment(account: &Account, assignment: &Assignment) -> Result<()> {
    match account.teacher_id() {
        _ if account.is_admin() => Ok(()),
        Some(teacher_id) if assignment.is_owned_by_teacher(teacher_id) => Ok(()),
        _ => Err(forbidden(account, &format!("assignment {}", assignment.id))),
    }
}

/// 查看作业：管理员、该课程的任课教师、作业对象学生
pub async fn ensure_can_view_assignment(
    storage: &dyn Storage,
    account: &Account,
    assignment: &Assignment,
) -> Result<()> {
    let allowed = match account.profile {
        AccountProfile::Admin => true,
        AccountProfile::Teacher { teacher_id } => {
            assignment.is_owned_by_teacher(teacher_id)
                || storage
                    .is_teacher_assigned(assignment.course_id, teacher_id)
                    .await?
        }
        AccountProfile::Student { student_id } => {
            let enrolled = storage
                .is_student_enrolled(assignment.course_id, student_id)
                .await?;
            assignment.accepts_student(student_id, enrolled)
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(forbidden(account, &format!("assignment {}", assignment.id)))
    }
}

/// 查看课程成员与作业：管理员、任课教师、选课学生
pub async fn ensure_course_member(
    storage: &dyn Storage,
    account: &Account,
    course_id: i64,
) -> Result<()> {
    let allowed = match account.profile {
        AccountProfile::Admin => true,
        AccountProfile::Teacher { teacher_id } => {
            storage.is_teacher_assigned(course_id, teacher_id).await?
        }
        AccountProfile::Student { student_id } => {
            storage.is_student_enrolled(course_id, student_id).await?
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(forbidden(account, &format!("course {course_id}")))
    }
}

/// 查看提交：管理员、提交者本人、作业布置者
pub fn ensure_can_view_submission(
    account: &Account,
    submission: &Submission,
    assignment: &Assignment,
) -> Result<()> {
    let allowed = match account.profile {
        AccountProfile::Admin => true,
        AccountProfile::Teacher { teacher_id } => {
            submission.is_owned_by_teacher_of_assignment(assignment, teacher_id)
        }
        AccountProfile::Student { student_id } => submission.is_owned_by_student(student_id),
    };
    if allowed {
        Ok(())
    } else {
        Err(forbidden(account, &format!("submission {}", submission.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::{NaiveDate, Utc};

    fn account(profile: AccountProfile) -> Account {
        let now = Utc::now();
        Account {
            id: 1,
            username: "user".to_string(),
            password_hash: String::new(),
            name: "N".to_string(),
            surname: "S".to_string(),
            profile,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn assignment() -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 10,
            course_id: 1,
            teacher_id: 2,
            name: "Essay".to_string(),
            description: None,
            publish_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: None,
            for_all_students: true,
            student_ids: vec![],
            attachment: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn submission(student_id: i64) -> Submission {
        let now = Utc::now();
        Submission {
            id: 5,
            assignment_id: 10,
            student_id,
            status: SubmissionStatus::Submitted,
            submitted_at: now,
            attachment: None,
            score: None,
            comments: None,
            graded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_manage_assignment() {
        let a = assignment();
        assert!(ensure_can_manage_assignment(&account(AccountProfile::Admin), &a).is_ok());
        assert!(
            ensure_can_manage_assignment(&account(AccountProfile::Teacher { teacher_id: 2 }), &a)
                .is_ok()
        );
        assert!(matches!(
            ensure_can_manage_assignment(&account(AccountProfile::Teacher { teacher_id: 3 }), &a),
            Err(AcademyError::Authorization(_))
        ));
        assert!(
            ensure_can_manage_assignment(&account(AccountProfile::Student { student_id: 2 }), &a)
                .is_err()
        );
    }

    #[test]
    fn test_view_submission() {
        let a = assignment();
        let s = submission(7);
        assert!(ensure_can_view_submission(&account(AccountProfile::Admin), &s, &a).is_ok());
        assert!(
            ensure_can_view_submission(
                &account(AccountProfile::Student { student_id: 7 }),
                &s,
                &a
            )
            .is_ok()
        );
        assert!(
            ensure_can_view_submission(
                &account(AccountProfile::Student { student_id: 8 }),
                &s,
                &a
            )
            .is_err()
        );
        assert!(
            ensure_can_view_submission(
                &account(AccountProfile::Teacher { teacher_id: 2 }),
                &s,
                &a
            )
            .is_ok()
        );
        assert!(
            ensure_can_view_submission(
                &account(AccountProfile::Teacher { teacher_id: 9 }),
                &s,
                &a
            )
            .is_err()
        );
    }

    #[test]
    fn test_self_or_admin() {
        let student = account(AccountProfile::Student { student_id: 4 });
        assert!(ensure_self_or_admin(&student, AccountProfile::Student { student_id: 4 }).is_ok());
        assert!(ensure_self_or_admin(&student, AccountProfile::Student { student_id: 5 }).is_err());
        assert!(
            ensure_self_or_admin(
                &account(AccountProfile::Admin),
                AccountProfile::Teacher { teacher_id: 1 }
            )
            .is_ok()
        );
    }
}
