use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{AcademyError, Result};

fn validate_assignment_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 200 {
        return Err(AcademyError::validation(
            "Assignment name must be between 1 and 200 characters",
        ));
    }
    Ok(())
}

fn validate_dates(publish_date: NaiveDate, due_date: Option<NaiveDate>) -> Result<()> {
    if due_date.is_some_and(|due| due < publish_date) {
        return Err(AcademyError::validation(
            "Due date cannot be earlier than the publish date",
        ));
    }
    Ok(())
}

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 缺省为当天
    pub publish_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub for_all_students: bool,
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

impl CreateAssignmentRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        validate_assignment_name(&self.name)?;
        validate_dates(self.publish_date.unwrap_or(today), self.due_date)
    }
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// 移除截止日期，不能与 due_date 同时给出
    #[serde(default)]
    pub clear_due_date: bool,
    pub for_all_students: Option<bool>,
}

impl UpdateAssignmentRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_assignment_name(name)?;
        }
        if self.clear_due_date && self.due_date.is_some() {
            return Err(AcademyError::validation(
                "Cannot set and clear the due date in the same update",
            ));
        }
        Ok(())
    }

    /// 合并后的日期校验
    pub fn validate_against(
        &self,
        publish_date: NaiveDate,
        due_date: Option<NaiveDate>,
    ) -> Result<()> {
        let due_date = if self.clear_due_date {
            None
        } else {
            self.due_date.or(due_date)
        };
        validate_dates(self.publish_date.unwrap_or(publish_date), due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_before_publish_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let req = CreateAssignmentRequest {
            course_id: 1,
            name: "Lab".to_string(),
            description: None,
            publish_date: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 4),
            for_all_students: true,
            student_ids: vec![],
        };
        assert!(matches!(req.validate(today), Err(AcademyError::Validation(_))));

        let req = CreateAssignmentRequest {
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            ..req
        };
        assert!(req.validate(today).is_ok());
    }

    #[test]
    fn test_update_merges_existing_dates() {
        let publish = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let req = UpdateAssignmentRequest {
            publish_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            ..Default::default()
        };
        assert!(
            req.validate_against(publish, NaiveDate::from_ymd_opt(2025, 1, 10))
                .is_err()
        );
    }

    #[test]
    fn test_clear_due_date() {
        let publish = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let req: UpdateAssignmentRequest =
            serde_json::from_str(r#"{"publish_date":"2025-02-01","clear_due_date":true}"#)
                .unwrap();
        assert!(req.validate().is_ok());
        assert!(
            req.validate_against(publish, NaiveDate::from_ymd_opt(2025, 1, 10))
                .is_ok()
        );

        let req = UpdateAssignmentRequest {
            due_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            clear_due_date: true,
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(AcademyError::Validation(_))));
    }
}
