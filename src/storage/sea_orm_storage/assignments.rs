use super::enrollments::{student_enrolled, teacher_assigned};
use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::assignment_students;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    Attachment,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

/// 按 ID 查找作业，不存在时返回 NotFound
pub(super) async fn find_assignment_model<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Model> {
    Assignments::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err("查询作业失败"))?
        .ok_or_else(|| AcademyError::not_found(format!("Assignment {id} not found")))
}

/// 作业显式指派的学生 ID（升序）
async fn load_student_ids<C: ConnectionTrait>(conn: &C, assignment_id: i64) -> Result<Vec<i64>> {
    assignment_students::Entity::find()
        .select_only()
        .column(assignment_students::Column::StudentId)
        .filter(assignment_students::Column::AssignmentId.eq(assignment_id))
        .order_by_asc(assignment_students::Column::StudentId)
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_err("查询作业学生失败"))
}

/// 加载完整的作业业务模型
pub(super) async fn load_assignment<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Assignment> {
    let model = find_assignment_model(conn, id).await?;
    let student_ids = load_student_ids(conn, id).await?;
    Ok(model.into_assignment(student_ids))
}

impl SeaOrmStorage {
    /// 教师在自己任教的课程下布置作业
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
        today: NaiveDate,
    ) -> Result<Assignment> {
        req.validate(today)?;

        let txn = self.db.begin().await?;

        super::courses::find_course_model(&txn, req.course_id).await?;
        if !teacher_assigned(&txn, req.course_id, teacher_id).await? {
            return Err(AcademyError::authorization(format!(
                "Teacher {teacher_id} does not teach course {}",
                req.course_id
            )));
        }

        let student_ids: BTreeSet<i64> = req.student_ids.iter().copied().collect();
        for &student_id in &student_ids {
            if !student_enrolled(&txn, req.course_id, student_id).await? {
                return Err(AcademyError::validation(format!(
                    "Student {student_id} is not enrolled in course {}",
                    req.course_id
                )));
            }
        }

        let now = now_ts();
        let model = ActiveModel {
            course_id: Set(req.course_id),
            teacher_id: Set(teacher_id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            publish_date: Set(req.publish_date.unwrap_or(today)),
            due_date: Set(req.due_date),
            for_all_students: Set(req.for_all_students),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建作业失败"))?;

        if !student_ids.is_empty() {
            assignment_students::Entity::insert_many(student_ids.iter().map(|&student_id| {
                assignment_students::ActiveModel {
                    assignment_id: Set(model.id),
                    student_id: Set(student_id),
                }
            }))
            .exec(&txn)
            .await
            .map_err(db_err("指派作业学生失败"))?;
        }

        txn.commit().await?;
        tracing::info!(
            "Assignment {} created in course {} by teacher {}",
            model.id,
            model.course_id,
            teacher_id
        );
        Ok(model.into_assignment(student_ids.into_iter().collect()))
    }

    pub async fn get_assignment_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let txn = self.db.begin().await?;
        let result = match Assignments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询作业失败"))?
        {
            Some(model) => {
                let student_ids = load_student_ids(&txn, id).await?;
                Some(model.into_assignment(student_ids))
            }
            None => None,
        };
        txn.commit().await?;
        Ok(result)
    }

    /// 课程下的全部作业，按发布日期排序
    pub async fn list_course_assignments_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let txn = self.db.begin().await?;
        super::courses::find_course_model(&txn, course_id).await?;

        let models = Assignments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::PublishDate)
            .order_by_asc(Column::Id)
            .all(&txn)
            .await
            .map_err(db_err("查询课程作业失败"))?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut targets: HashMap<i64, Vec<i64>> = HashMap::new();
        if !ids.is_empty() {
            let edges = assignment_students::Entity::find()
                .filter(assignment_students::Column::AssignmentId.is_in(ids))
                .order_by_asc(assignment_students::Column::StudentId)
                .all(&txn)
                .await
                .map_err(db_err("查询作业学生失败"))?;
            for edge in edges {
                targets
                    .entry(edge.assignment_id)
                    .or_default()
                    .push(edge.student_id);
            }
        }
        txn.commit().await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let student_ids = targets.remove(&m.id).unwrap_or_default();
                m.into_assignment(student_ids)
            })
            .collect())
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        update.validate()?;

        let txn = self.db.begin().await?;

        let existing = find_assignment_model(&txn, id).await?;
        update.validate_against(existing.publish_date, existing.due_date)?;

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(publish_date) = update.publish_date {
            model.publish_date = Set(publish_date);
        }
        if update.clear_due_date {
            model.due_date = Set(None);
        } else if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date));
        }
        if let Some(for_all_students) = update.for_all_students {
            model.for_all_students = Set(for_all_students);
        }
        model.updated_at = Set(now_ts());
        model.update(&txn).await.map_err(db_err("更新作业失败"))?;

        let assignment = load_assignment(&txn, id).await?;
        txn.commit().await?;
        Ok(assignment)
    }

    /// 删除作业，显式指派与提交随外键级联删除
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<()> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除作业失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::not_found(format!("Assignment {id} not found")));
        }
        tracing::info!("Assignment {} deleted", id);
        Ok(())
    }

    /// 显式指派学生，学生必须已选该课程
    pub async fn assign_student_to_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let assignment = find_assignment_model(&txn, assignment_id).await?;
        super::students::find_student_model(&txn, student_id).await?;
        if !student_enrolled(&txn, assignment.course_id, student_id).await? {
            return Err(AcademyError::validation(format!(
                "Student {student_id} is not enrolled in course {}",
                assignment.course_id
            )));
        }
        let existing = assignment_students::Entity::find_by_id((assignment_id, student_id))
            .one(&txn)
            .await
            .map_err(db_err("查询作业学生失败"))?;
        if existing.is_some() {
            return Err(AcademyError::conflict(format!(
                "Student {student_id} is already assigned to assignment {assignment_id}"
            )));
        }

        assignment_students::ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
        }
        .insert(&txn)
        .await
        .map_err(db_err("指派作业学生失败"))?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn remove_student_from_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        find_assignment_model(&txn, assignment_id).await?;
        let result = assignment_students::Entity::delete_by_id((assignment_id, student_id))
            .exec(&txn)
            .await
            .map_err(db_err("移除作业学生失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::conflict(format!(
                "Student {student_id} is not assigned to assignment {assignment_id}"
            )));
        }

        txn.commit().await?;
        Ok(())
    }

    /// 替换作业附件
    pub async fn set_assignment_attachment_impl(
        &self,
        id: i64,
        attachment: Attachment,
    ) -> Result<Assignment> {
        if attachment.data.is_empty() {
            return Err(AcademyError::validation("Attachment is empty"));
        }

        let txn = self.db.begin().await?;

        let mut model: ActiveModel = find_assignment_model(&txn, id).await?.into();
        model.attachment_name = Set(Some(attachment.file_name));
        model.attachment_type = Set(Some(attachment.content_type));
        model.attachment_data = Set(Some(attachment.data));
        model.updated_at = Set(now_ts());
        model
            .update(&txn)
            .await
            .map_err(db_err("保存作业附件失败"))?;

        let assignment = load_assignment(&txn, id).await?;
        txn.commit().await?;
        Ok(assignment)
    }

    pub async fn get_assignment_attachment_impl(&self, id: i64) -> Result<Option<Attachment>> {
        Ok(find_assignment_model(&self.db, id).await?.into_attachment())
    }
}
