//! 作业实体

use sea_orm::entity::prelude::*;

use crate::models::common::{Attachment, AttachmentInfo};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub publish_date: Date,
    pub due_date: Option<Date>,
    pub for_all_students: bool,
    pub attachment_name: Option<String>,
    pub attachment_type: Option<String>,
    pub attachment_data: Option<Vec<u8>>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "Restrict"
    )]
    Teacher,
    #[sea_orm(has_many = "super::assignment_students::Entity")]
    AssignmentStudents,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::assignment_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentStudents.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，student_ids 为显式指派的学生
    pub fn into_assignment(
        self,
        student_ids: Vec<i64>,
    ) -> crate::models::assignments::entities::Assignment {
        let attachment = AttachmentInfo::from_columns(
            self.attachment_name,
            self.attachment_type,
            self.attachment_data.as_deref(),
        );
        crate::models::assignments::entities::Assignment {
            id: self.id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            name: self.name,
            description: self.description,
            publish_date: self.publish_date,
            due_date: self.due_date,
            for_all_students: self.for_all_students,
            student_ids,
            attachment,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
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
