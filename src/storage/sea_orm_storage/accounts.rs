use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts, Model};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginatedResponse,
    accounts::{
        entities::{Account, AccountProfile, AccountRole, validate_role_relations},
        requests::{AccountChanges, AccountListQuery, NewAccount},
    },
    students::{entities::Student, requests::CreateStudentRequest},
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};
use crate::storage::AccountCredentials;
use crate::utils::sql::search_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 用户名已被其他账号占用时返回 Conflict
async fn ensure_username_free<C: ConnectionTrait>(
    conn: &C,
    username: &str,
    except_id: Option<i64>,
) -> Result<()> {
    let mut select = Accounts::find().filter(Column::Username.eq(username));
    if let Some(id) = except_id {
        select = select.filter(Column::Id.ne(id));
    }
    let taken = select
        .one(conn)
        .await
        .map_err(db_err("查询用户名失败"))?
        .is_some();
    if taken {
        return Err(AcademyError::conflict(format!(
            "Username '{username}' is already taken"
        )));
    }
    Ok(())
}

/// 档案必须存在，且未被其他账号关联
async fn ensure_profile_linkable<C: ConnectionTrait>(
    conn: &C,
    profile: &AccountProfile,
    except_id: Option<i64>,
) -> Result<()> {
    let link_filter = match *profile {
        AccountProfile::Admin => return Ok(()),
        AccountProfile::Teacher { teacher_id } => {
            super::teachers::find_teacher_model(conn, teacher_id).await?;
            Column::TeacherId.eq(teacher_id)
        }
        AccountProfile::Student { student_id } => {
            super::students::find_student_model(conn, student_id).await?;
            Column::StudentId.eq(student_id)
        }
    };

    let mut select = Accounts::find().filter(link_filter);
    if let Some(id) = except_id {
        select = select.filter(Column::Id.ne(id));
    }
    if let Some(other) = select.one(conn).await.map_err(db_err("查询档案关联失败"))? {
        return Err(AcademyError::conflict(format!(
            "Profile is already linked to account '{}'",
            other.username
        )));
    }
    Ok(())
}

async fn insert_account<C: ConnectionTrait>(conn: &C, account: NewAccount) -> Result<Model> {
    let now = now_ts();
    ActiveModel {
        username: Set(account.username),
        password_hash: Set(account.password_hash),
        name: Set(account.name),
        surname: Set(account.surname),
        role: Set(account.profile.role().to_string()),
        teacher_id: Set(account.profile.teacher_id()),
        student_id: Set(account.profile.student_id()),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_err("创建账号失败"))
}

/// 新档案的账号：显示名缺省取档案姓名
fn new_account_for_profile(
    credentials: AccountCredentials,
    default_name: &str,
    default_surname: &str,
    profile: AccountProfile,
) -> NewAccount {
    NewAccount {
        username: credentials.username,
        password_hash: credentials.password_hash,
        name: credentials
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_name.to_string()),
        surname: credentials
            .surname
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_surname.to_string()),
        profile,
    }
}

impl SeaOrmStorage {
    /// 创建账号（关联已存在的档案）
    pub async fn create_account_impl(&self, account: NewAccount) -> Result<Account> {
        let txn = self.db.begin().await?;

        ensure_username_free(&txn, &account.username, None).await?;
        ensure_profile_linkable(&txn, &account.profile, None).await?;
        let model = insert_account(&txn, account).await?;

        txn.commit().await?;
        model.into_account()
    }

    /// 先写学生档案，再写关联账号
    pub async fn create_student_with_account_impl(
        &self,
        req: CreateStudentRequest,
        credentials: AccountCredentials,
    ) -> Result<(Student, Account)> {
        let txn = self.db.begin().await?;

        ensure_username_free(&txn, &credentials.username, None).await?;
        let student = super::students::insert_student(&txn, req).await?;
        let profile = validate_role_relations(AccountRole::Student, None, Some(student.id))?;
        let account = new_account_for_profile(
            credentials,
            &student.first_name,
            &student.last_name,
            profile,
        );
        let account = insert_account(&txn, account).await?;

        txn.commit().await?;
        Ok((student.into_student(), account.into_account()?))
    }

    /// 先写教师档案，再写关联账号
    pub async fn create_teacher_with_account_impl(
        &self,
        req: CreateTeacherRequest,
        credentials: AccountCredentials,
    ) -> Result<(Teacher, Account)> {
        let txn = self.db.begin().await?;

        ensure_username_free(&txn, &credentials.username, None).await?;
        let teacher = super::teachers::insert_teacher(&txn, req).await?;
        let profile = validate_role_relations(AccountRole::Teacher, Some(teacher.id), None)?;
        let account = new_account_for_profile(
            credentials,
            &teacher.first_name,
            &teacher.last_name,
            profile,
        );
        let account = insert_account(&txn, account).await?;

        txn.commit().await?;
        Ok((teacher.into_teacher(), account.into_account()?))
    }

    /// 通过 ID 获取账号
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询账号失败"))?
            .map(Model::into_account)
            .transpose()
    }

    /// 通过用户名获取账号
    pub async fn get_account_by_username_impl(&self, username: &str) -> Result<Option<Account>> {
        Accounts::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err("查询账号失败"))?
            .map(Model::into_account)
            .transpose()
    }

    /// 分页列出账号
    pub async fn list_accounts_impl(
        &self,
        query: AccountListQuery,
    ) -> Result<PaginatedResponse<Account>> {
        let mut select = Accounts::find();

        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(search_condition(
                &[Column::Username, Column::Name, Column::Surname],
                search,
            ));
        }
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let paginator = select.order_by_asc(Column::Id).paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询账号总数失败"))?;
        let items = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(db_err("查询账号列表失败"))?
            .into_iter()
            .map(Model::into_account)
            .collect::<Result<Vec<_>>>()?;

        Ok(PaginatedResponse::new(items, query.page, query.size, total))
    }

    /// 更新账号
    ///
    /// 角色变化时先清空原档案链接，再套用本次提供的链接，最后整体校验。
    pub async fn update_account_impl(&self, id: i64, changes: AccountChanges) -> Result<Account> {
        let txn = self.db.begin().await?;

        let model = Accounts::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询账号失败"))?
            .ok_or_else(|| AcademyError::not_found(format!("Account {id} not found")))?;
        let current = model.clone().into_account()?;

        let role = changes.role.unwrap_or(current.role());
        let (teacher_id, student_id) = if role != current.role() {
            (None, None)
        } else {
            (current.teacher_id(), current.student_id())
        };
        let profile = validate_role_relations(
            role,
            changes.teacher_id.or(teacher_id),
            changes.student_id.or(student_id),
        )?;
        ensure_profile_linkable(&txn, &profile, Some(id)).await?;

        let mut active: ActiveModel = model.into();
        if let Some(username) = changes.username {
            ensure_username_free(&txn, &username, Some(id)).await?;
            active.username = Set(username);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(surname) = changes.surname {
            active.surname = Set(surname);
        }
        active.role = Set(profile.role().to_string());
        active.teacher_id = Set(profile.teacher_id());
        active.student_id = Set(profile.student_id());
        active.updated_at = Set(now_ts());

        let updated = active.update(&txn).await.map_err(db_err("更新账号失败"))?;

        txn.commit().await?;
        updated.into_account()
    }

    /// 删除账号（档案保留）
    pub async fn delete_account_impl(&self, id: i64) -> Result<()> {
        let result = Accounts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除账号失败"))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<()> {
        Accounts::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err("更新最后登录时间失败"))?;
        Ok(())
    }

    /// 统计账号数量
    pub async fn count_accounts_impl(&self) -> Result<u64> {
        Accounts::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计账号数量失败"))
    }
}

/// 删除档案前先删除其关联账号
pub(super) async fn delete_linked_account<C: ConnectionTrait>(
    conn: &C,
    profile: AccountProfile,
) -> Result<()> {
    let filter = match profile {
        AccountProfile::Admin => return Ok(()),
        AccountProfile::Teacher { teacher_id } => Column::TeacherId.eq(teacher_id),
        AccountProfile::Student { student_id } => Column::StudentId.eq(student_id),
    };
    let result = Accounts::delete_many()
        .filter(filter)
        .exec(conn)
        .await
        .map_err(db_err("删除关联账号失败"))?;
    if result.rows_affected > 0 {
        tracing::info!("Deleted account linked to {:?}", profile);
    }
    Ok(())
}
