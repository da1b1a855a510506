use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::assignments;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginatedResponse,
    accounts::entities::AccountProfile,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};
use crate::utils::sql::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 按 ID 查找教师档案，不存在时返回 NotFound
pub(super) async fn find_teacher_model<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Model> {
    Teachers::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err("查询教师失败"))?
        .ok_or_else(|| AcademyError::not_found(format!("Teacher {id} not found")))
}

pub(super) async fn insert_teacher<C: ConnectionTrait>(
    conn: &C,
    req: CreateTeacherRequest,
) -> Result<Model> {
    let now = now_ts();
    ActiveModel {
        first_name: Set(req.first_name.trim().to_string()),
        last_name: Set(req.last_name.trim().to_string()),
        email: Set(req.email),
        phone: Set(req.phone),
        specialty: Set(req.specialty),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_err("创建教师失败"))
}

impl SeaOrmStorage {
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        Ok(insert_teacher(&self.db, req).await?.into_teacher())
    }

    pub async fn get_teacher_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询教师失败"))?;
        Ok(result.map(Model::into_teacher))
    }

    /// 分页列出教师，按姓名、邮箱、专业搜索
    pub async fn list_teachers_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        let mut select = Teachers::find();
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(search_condition(
                &[
                    Column::FirstName,
                    Column::LastName,
                    Column::Email,
                    Column::Specialty,
                ],
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
            .map_err(db_err("查询教师总数失败"))?;
        let teachers = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(db_err("查询教师列表失败"))?;

        Ok(PaginatedResponse::new(
            teachers.into_iter().map(Model::into_teacher).collect(),
            query.page,
            query.size,
            total,
        ))
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Teacher> {
        let txn = self.db.begin().await?;

        let mut model: ActiveModel = find_teacher_model(&txn, id).await?.into();
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
        if let Some(specialty) = update.specialty {
            model.specialty = Set(Some(specialty));
        }
        model.updated_at = Set(now_ts());

        let updated = model.update(&txn).await.map_err(db_err("更新教师失败"))?;
        txn.commit().await?;
        Ok(updated.into_teacher())
    }

    /// 删除教师档案
    ///
    /// 仍布置有作业的教师不能删除；关联账号在同一事务中删除，课程关系随外键级联删除。
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        find_teacher_model(&txn, id).await?;
        let owned = assignments::Entity::find()
            .filter(assignments::Column::TeacherId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err("查询教师作业失败"))?;
        if owned > 0 {
            return Err(AcademyError::conflict(format!(
                "Teacher {id} still owns {owned} assignment(s)"
            )));
        }

        super::accounts::delete_linked_account(&txn, AccountProfile::Teacher { teacher_id: id })
            .await?;
        Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除教师失败"))?;

        txn.commit().await?;
        Ok(())
    }
}
