use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginatedResponse,
    accounts::entities::AccountProfile,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
};
use crate::utils::sql::search_condition;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 按 ID 查找学生档案，不存在时返回 NotFound
pub(super) async fn find_student_model<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Model> {
    Students::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err("查询学生失败"))?
        .ok_or_else(|| AcademyError::not_found(format!("Student {id} not found")))
}

pub(super) async fn insert_student<C: ConnectionTrait>(
    conn: &C,
    req: CreateStudentRequest,
) -> Result<Model> {
    let now = now_ts();
    ActiveModel {
        first_name: Set(req.first_name.trim().to_string()),
        last_name: Set(req.last_name.trim().to_string()),
        email: Set(req.email),
        phone: Set(req.phone),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_err("创建学生失败"))
}

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        Ok(insert_student(&self.db, req).await?.into_student())
    }

    pub async fn get_student_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询学生失败"))?;
        Ok(result.map(Model::into_student))
    }

    /// 分页列出学生，按姓名、邮箱搜索
    pub async fn list_students_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let mut select = Students::find();
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(search_condition(
                &[Column::FirstName, Column::LastName, Column::Email],
                search,
            ));
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询学生总数失败"))?;
        let students = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(db_err("查询学生列表失败"))?;

        Ok(PaginatedResponse::new(
            students.into_iter().map(Model::into_student).collect(),
            query.page,
            query.size,
            total,
        ))
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Student> {
        let txn = self.db.begin().await?;

        let mut model: ActiveModel = find_student_model(&txn, id).await?.into();
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        model.updated_at = Set(now_ts());

        let updated = model.update(&txn).await.map_err(db_err("更新学生失败"))?;
        txn.commit().await?;
        Ok(updated.into_student())
    }

    /// 删除学生档案
    ///
    /// 关联账号在同一事务中删除；选课、作业指派与提交随外键级联删除。
    pub async fn delete_student_impl(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        find_student_model(&txn, id).await?;
        super::accounts::delete_linked_account(&txn, AccountProfile::Student { student_id: id })
            .await?;
        Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除学生失败"))?;

        txn.commit().await?;
        Ok(())
    }
}
