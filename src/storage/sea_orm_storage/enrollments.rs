//! 课程关系管理
//!
//! 课程与教师、课程与学生的多对多关系各自只存一张边表，两个方向的查询都读同一张表，
//! 不存在“只更新了一侧”的中间状态。

use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::{assignment_students, assignments, course_students, course_teachers};
use crate::entity::{courses::Entity as Courses, students::Entity as Students, teachers::Entity as Teachers};
use crate::errors::{AcademyError, Result};
use crate::models::{courses::entities::Course, students::entities::Student, teachers::entities::Teacher};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

pub(super) async fn teacher_assigned<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    teacher_id: i64,
) -> Result<bool> {
    Ok(course_teachers::Entity::find_by_id((course_id, teacher_id))
        .one(conn)
        .await
        .map_err(db_err("查询课程教师失败"))?
        .is_some())
}

pub(super) async fn student_enrolled<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    student_id: i64,
) -> Result<bool> {
    Ok(course_students::Entity::find_by_id((course_id, student_id))
        .one(conn)
        .await
        .map_err(db_err("查询选课关系失败"))?
        .is_some())
}

impl SeaOrmStorage {
    /// 为课程分配教师
    pub async fn assign_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        super::courses::find_course_model(&txn, course_id).await?;
        super::teachers::find_teacher_model(&txn, teacher_id).await?;
        if teacher_assigned(&txn, course_id, teacher_id).await? {
            return Err(AcademyError::conflict(format!(
                "Teacher {teacher_id} is already assigned to course {course_id}"
            )));
        }

        course_teachers::ActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            assigned_at: Set(now_ts()),
        }
        .insert(&txn)
        .await
        .map_err(db_err("分配教师失败"))?;

        txn.commit().await?;
        tracing::info!("Teacher {} assigned to course {}", teacher_id, course_id);
        Ok(())
    }

    /// 将教师移出课程
    pub async fn remove_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        super::courses::find_course_model(&txn, course_id).await?;
        super::teachers::find_teacher_model(&txn, teacher_id).await?;
        let result = course_teachers::Entity::delete_by_id((course_id, teacher_id))
            .exec(&txn)
            .await
            .map_err(db_err("移除教师失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::conflict(format!(
                "Teacher {teacher_id} is not assigned to course {course_id}"
            )));
        }

        txn.commit().await?;
        tracing::info!("Teacher {} removed from course {}", teacher_id, course_id);
        Ok(())
    }

    /// 学生选课
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        super::courses::find_course_model(&txn, course_id).await?;
        super::students::find_student_model(&txn, student_id).await?;
        if student_enrolled(&txn, course_id, student_id).await? {
            return Err(AcademyError::conflict(format!(
                "Student {student_id} is already enrolled in course {course_id}"
            )));
        }

        course_students::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(now_ts()),
        }
        .insert(&txn)
        .await
        .map_err(db_err("选课失败"))?;

        txn.commit().await?;
        tracing::info!("Student {} enrolled in course {}", student_id, course_id);
        Ok(())
    }

    /// 学生退课，同时撤销其在该课程作业上的显式指派
    pub async fn unenroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        super::courses::find_course_model(&txn, course_id).await?;
        super::students::find_student_model(&txn, student_id).await?;
        let result = course_students::Entity::delete_by_id((course_id, student_id))
            .exec(&txn)
            .await
            .map_err(db_err("退课失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::conflict(format!(
                "Student {student_id} is not enrolled in course {course_id}"
            )));
        }

        let course_assignment_ids: Vec<i64> = assignments::Entity::find()
            .select_only()
            .column(assignments::Column::Id)
            .filter(assignments::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err("查询课程作业失败"))?;
        if !course_assignment_ids.is_empty() {
            assignment_students::Entity::delete_many()
                .filter(assignment_students::Column::StudentId.eq(student_id))
                .filter(assignment_students::Column::AssignmentId.is_in(course_assignment_ids))
                .exec(&txn)
                .await
                .map_err(db_err("撤销作业指派失败"))?;
        }

        txn.commit().await?;
        tracing::info!("Student {} unenrolled from course {}", student_id, course_id);
        Ok(())
    }

    /// 课程的教师集合
    pub async fn get_course_teachers_impl(&self, course_id: i64) -> Result<Vec<Teacher>> {
        let txn = self.db.begin().await?;
        let course = super::courses::find_course_model(&txn, course_id).await?;
        let teachers = course
            .find_related(Teachers)
            .order_by_asc(crate::entity::teachers::Column::Id)
            .all(&txn)
            .await
            .map_err(db_err("查询课程教师失败"))?;
        txn.commit().await?;
        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 课程的学生集合
    pub async fn get_course_students_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let txn = self.db.begin().await?;
        let course = super::courses::find_course_model(&txn, course_id).await?;
        let students = course
            .find_related(Students)
            .order_by_asc(crate::entity::students::Column::Id)
            .all(&txn)
            .await
            .map_err(db_err("查询课程学生失败"))?;
        txn.commit().await?;
        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 教师所在的课程
    pub async fn get_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let txn = self.db.begin().await?;
        let teacher = super::teachers::find_teacher_model(&txn, teacher_id).await?;
        let courses = teacher
            .find_related(Courses)
            .order_by_asc(crate::entity::courses::Column::Id)
            .all(&txn)
            .await
            .map_err(db_err("查询教师课程失败"))?;
        txn.commit().await?;
        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 学生所选的课程
    pub async fn get_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let txn = self.db.begin().await?;
        let student = super::students::find_student_model(&txn, student_id).await?;
        let courses = student
            .find_related(Courses)
            .order_by_asc(crate::entity::courses::Column::Id)
            .all(&txn)
            .await
            .map_err(db_err("查询学生课程失败"))?;
        txn.commit().await?;
        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn is_teacher_assigned_impl(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        teacher_assigned(&self.db, course_id, teacher_id).await
    }

    pub async fn is_student_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        student_enrolled(&self.db, course_id, student_id).await
    }
}
