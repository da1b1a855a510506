//! 提交生命周期
//!
//! 状态只有三种：Submitted、Late、Graded；未提交即不存在记录。
//! 每次创建或上传附件都按事件日期与截止日期重新判定是否逾期。

use super::enrollments::student_enrolled;
use super::{SeaOrmStorage, db_err};
use crate::entity::assignments;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    Attachment, PaginatedResponse,
    submissions::{
        entities::{Submission, SubmissionStatus, event_date, validate_score},
        requests::{CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

async fn find_submission_model<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Model> {
    Submissions::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err("查询提交失败"))?
        .ok_or_else(|| AcademyError::not_found(format!("Submission {id} not found")))
}

impl SeaOrmStorage {
    /// 学生提交作业
    ///
    /// 检查顺序：作业存在、学生存在、学生属于作业对象、尚未提交过。
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let txn = self.db.begin().await?;

        let assignment = super::assignments::load_assignment(&txn, req.assignment_id).await?;
        super::students::find_student_model(&txn, student_id).await?;
        let enrolled = student_enrolled(&txn, assignment.course_id, student_id).await?;
        if !assignment.accepts_student(student_id, enrolled) {
            tracing::info!(
                "Student {} rejected for assignment {}",
                student_id,
                assignment.id
            );
            return Err(AcademyError::authorization(format!(
                "Student {student_id} is not a target of assignment {}",
                assignment.id
            )));
        }

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment.id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(db_err("查询提交失败"))?;
        if existing.is_some() {
            return Err(AcademyError::conflict(format!(
                "Student {student_id} has already submitted assignment {}",
                assignment.id
            )));
        }

        let status = SubmissionStatus::for_event(event_date(now), assignment.due_date);
        let ts = now.timestamp();
        let model = ActiveModel {
            assignment_id: Set(assignment.id),
            student_id: Set(student_id),
            status: Set(status.to_string()),
            submitted_at: Set(ts),
            comments: Set(req.comments),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建提交失败"))?;

        txn.commit().await?;
        tracing::info!(
            "Submission {} created for assignment {} by student {} ({})",
            model.id,
            model.assignment_id,
            student_id,
            status
        );
        model.into_submission()
    }

    /// 上传（或替换）提交附件，已有评分随之清除
    pub async fn upload_submission_attachment_impl(
        &self,
        submission_id: i64,
        student_id: i64,
        attachment: Attachment,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let txn = self.db.begin().await?;

        let existing = find_submission_model(&txn, submission_id).await?;
        if existing.student_id != student_id {
            return Err(AcademyError::authorization(format!(
                "Submission {submission_id} does not belong to student {student_id}"
            )));
        }
        if attachment.data.is_empty() {
            return Err(AcademyError::validation("Attachment is empty"));
        }

        let due_date = assignments::Entity::find_by_id(existing.assignment_id)
            .one(&txn)
            .await
            .map_err(db_err("查询作业失败"))?
            .ok_or_else(|| {
                AcademyError::not_found(format!(
                    "Assignment {} not found",
                    existing.assignment_id
                ))
            })?
            .due_date;
        let status = SubmissionStatus::for_event(event_date(now), due_date);

        let ts = now.timestamp();
        let mut model: ActiveModel = existing.into();
        model.attachment_name = Set(Some(attachment.file_name));
        model.attachment_type = Set(Some(attachment.content_type));
        model.attachment_data = Set(Some(attachment.data));
        model.status = Set(status.to_string());
        model.submitted_at = Set(ts);
        model.score = Set(None);
        model.graded_at = Set(None);
        model.updated_at = Set(ts);
        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("保存提交附件失败"))?;

        txn.commit().await?;
        tracing::info!(
            "Attachment uploaded for submission {} ({})",
            submission_id,
            status
        );
        updated.into_submission()
    }

    /// 评分
    ///
    /// 检查顺序：提交存在、教师为作业布置者、已上传附件、成绩范围。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: GradeSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        let txn = self.db.begin().await?;

        let existing = find_submission_model(&txn, submission_id).await?;
        let assignment = super::assignments::load_assignment(&txn, existing.assignment_id).await?;
        if !assignment.is_owned_by_teacher(teacher_id) {
            tracing::info!(
                "Teacher {} rejected for grading submission {}",
                teacher_id,
                submission_id
            );
            return Err(AcademyError::authorization(format!(
                "Teacher {teacher_id} did not create assignment {}",
                assignment.id
            )));
        }
        if existing.attachment_data.as_ref().is_none_or(|d| d.is_empty()) {
            return Err(AcademyError::validation(
                "Submission has no attachment to grade",
            ));
        }
        validate_score(grade.score)?;

        let ts = now.timestamp();
        let mut model: ActiveModel = existing.into();
        model.status = Set(SubmissionStatus::Graded.to_string());
        model.score = Set(Some(grade.score));
        if let Some(comments) = grade.comments {
            model.comments = Set(Some(comments));
        }
        model.graded_at = Set(Some(ts));
        model.updated_at = Set(ts);
        let updated = model.update(&txn).await.map_err(db_err("评分失败"))?;

        txn.commit().await?;
        tracing::info!(
            "Submission {} graded {} by teacher {}",
            submission_id,
            grade.score,
            teacher_id
        );
        updated.into_submission()
    }

    pub async fn get_submission_impl(&self, id: i64) -> Result<Option<Submission>> {
        Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询提交失败"))?
            .map(Model::into_submission)
            .transpose()
    }

    pub async fn get_submission_attachment_impl(&self, id: i64) -> Result<Option<Attachment>> {
        Ok(find_submission_model(&self.db, id).await?.into_attachment())
    }

    /// 分页列出提交，按最近提交时间倒序
    pub async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>> {
        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::submissions::Relation::Assignment.def(),
                )
                .filter(assignments::Column::TeacherId.eq(teacher_id));
        }

        let paginator = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询提交总数失败"))?;
        let models = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(db_err("查询提交列表失败"))?;

        let items = models
            .into_iter()
            .map(Model::into_submission)
            .collect::<Result<Vec<_>>>()?;
        Ok(PaginatedResponse::new(items, query.page, query.size, total))
    }
}
