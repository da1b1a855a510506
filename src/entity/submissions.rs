//! 提交实体

use sea_orm::entity::prelude::*;

use crate::errors::AcademyError;
use crate::models::common::{Attachment, AttachmentInfo};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: String,
    pub submitted_at: i64,
    pub attachment_name: Option<String>,
    pub attachment_type: Option<String>,
    pub attachment_data: Option<Vec<u8>>,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub graded_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(
        self,
    ) -> crate::errors::Result<crate::models::submissions::entities::Submission> {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};

        let status = self.status.parse::<SubmissionStatus>().map_err(|e| {
            AcademyError::database_operation(format!("Submission {}: {e}", self.id))
        })?;
        let attachment = AttachmentInfo::from_columns(
            self.attachment_name,
            self.attachment_type,
            self.attachment_data.as_deref(),
        );

        Ok(Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            status,
            submitted_at: super::from_timestamp(self.submitted_at),
            attachment,
            score: self.score,
            comments: self.comments,
            graded_at: self.graded_at.map(super::from_timestamp),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }

    pub fn into_attachment(self) -> Option<Attachment> {
        match (self.attachment_name, self.attachment_data) {
            (Some(file_name), Some(data)) if !data.is_empty() => Some(Attachment {
                file_name,
                content_type: self
                    .attachment_type
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                data,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;

    fn row(status: &str) -> Model {
        Model {
            id: 7,
            assignment_id: 2,
            student_id: 3,
            status: status.to_string(),
            submitted_at: 1_736_500_000,
            attachment_name: Some("answer.pdf".to_string()),
            attachment_type: None,
            attachment_data: Some(vec![1, 2, 3]),
            score: None,
            comments: None,
            graded_at: None,
            created_at: 1_736_500_000,
            updated_at: 1_736_500_000,
        }
    }

    #[test]
    fn test_into_submission() {
        let submission = row("late").into_submission().unwrap();
        assert_eq!(submission.status, SubmissionStatus::Late);
        assert_eq!(submission.attachment.map(|a| a.size), Some(3));

        let err = row("lost").into_submission().unwrap_err();
        assert!(matches!(err, AcademyError::DatabaseOperation(_)));
    }

    #[test]
    fn test_into_attachment_defaults_content_type() {
        let attachment = row("submitted").into_attachment().unwrap();
        assert_eq!(attachment.content_type, "application/octet-stream");
    }
}
