use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginatedResponse,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
};
use crate::utils::sql::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 按 ID 查找课程，不存在时返回 NotFound
pub(super) async fn find_course_model<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Model> {
    Courses::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err("查询课程失败"))?
        .ok_or_else(|| AcademyError::not_found(format!("Course {id} not found")))
}

/// 课程名唯一
async fn ensure_course_name_free<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except_id: Option<i64>,
) -> Result<()> {
    let mut select = Courses::find().filter(Column::Name.eq(name));
    if let Some(id) = except_id {
        select = select.filter(Column::Id.ne(id));
    }
    if select
        .one(conn)
        .await
        .map_err(db_err("查询课程失败"))?
        .is_some()
    {
        return Err(AcademyError::conflict(format!(
            "Course '{name}' already exists"
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let txn = self.db.begin().await?;

        let name = req.name.trim().to_string();
        ensure_course_name_free(&txn, &name, None).await?;

        let now = now_ts();
        let model = ActiveModel {
            name: Set(name),
            description: Set(req.description),
            level: Set(req.level.to_string()),
            price: Set(req.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建课程失败"))?;

        txn.commit().await?;
        Ok(model.into_course())
    }

    pub async fn get_course_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询课程失败"))?;
        Ok(result.map(Model::into_course))
    }

    /// 分页列出课程，支持等级筛选与名称/描述搜索
    pub async fn list_courses_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let mut select = Courses::find();

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(search_condition(
                &[Column::Name, Column::Description],
                search,
            ));
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询课程总数失败"))?;
        let courses = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(db_err("查询课程列表失败"))?;

        Ok(PaginatedResponse::new(
            courses.into_iter().map(Model::into_course).collect(),
            query.page,
            query.size,
            total,
        ))
    }

    pub async fn update_course_impl(&self, id: i64, update: UpdateCourseRequest) -> Result<Course> {
        let txn = self.db.begin().await?;

        let mut model: ActiveModel = find_course_model(&txn, id).await?.into();
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            ensure_course_name_free(&txn, &name, Some(id)).await?;
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(price) = update.price {
            model.price = Set(price);
        }
        model.updated_at = Set(now_ts());

        let updated = model.update(&txn).await.map_err(db_err("更新课程失败"))?;
        txn.commit().await?;
        Ok(updated.into_course())
    }

    /// 删除课程，关系边、作业与提交随外键级联删除
    pub async fn delete_course_impl(&self, id: i64) -> Result<()> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除课程失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::not_found(format!("Course {id} not found")));
        }
        Ok(())
    }
}
