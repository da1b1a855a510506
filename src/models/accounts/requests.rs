use serde::Deserialize;
use ts_rs::TS;

use super::entities::AccountRole;
use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::utils::validate::{validate_password, validate_person_name, validate_username};

// 账号查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<AccountRole>,
    pub search: Option<String>,
}

// 账号列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AccountListQuery {
    pub page: u64,
    pub size: u64,
    pub role: Option<AccountRole>,
    pub search: Option<String>,
}

impl From<AccountListParams> for AccountListQuery {
    fn from(params: AccountListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            role: params.role,
            search: params.search,
        }
    }
}

/// 管理员创建账号（关联已存在的档案）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub role: AccountRole,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        validate_person_name("name", &self.name)?;
        validate_person_name("surname", &self.surname)
    }
}

/// 同时创建学生档案与学生账号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct CreateStudentAccountRequest {
    pub username: String,
    pub password: String,
    /// 缺省时取档案的 first_name
    pub name: Option<String>,
    /// 缺省时取档案的 last_name
    pub surname: Option<String>,
    pub student: CreateStudentRequest,
}

impl CreateStudentAccountRequest {
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        self.student.validate()
    }
}

/// 同时创建教师档案与教师账号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct CreateTeacherAccountRequest {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub teacher: CreateTeacherRequest,
}

impl CreateTeacherAccountRequest {
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        self.teacher.validate()
    }
}

// 账号更新请求
//
// 角色变化时先清空原有档案链接，再应用本次请求中的 teacher_id / student_id
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<AccountRole>,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl UpdateAccountRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        if let Some(name) = &self.name {
            validate_person_name("name", name)?;
        }
        if let Some(surname) = &self.surname {
            validate_person_name("surname", surname)?;
        }
        Ok(())
    }
}

/// 账号更新后的完整字段（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<AccountRole>,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// 待写入的新账号（密码已哈希，档案链接已校验）
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub profile: super::entities::AccountProfile,
}
