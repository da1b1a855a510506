use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AccountService;
use crate::config::Argon2Config;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    accounts::{
        entities::{Account, validate_role_relations},
        requests::{
            CreateAccountRequest, CreateStudentAccountRequest, CreateTeacherAccountRequest,
            NewAccount,
        },
        responses::{StudentAccountResponse, TeacherAccountResponse},
    },
    students::entities::Student,
    teachers::entities::Teacher,
};
use crate::storage::{AccountCredentials, Storage};
use crate::utils::password::hash_password_with;

fn credentials(
    username: &str,
    password: &str,
    name: Option<String>,
    surname: Option<String>,
    argon2: &Argon2Config,
) -> Result<AccountCredentials> {
    Ok(AccountCredentials {
        username: username.trim().to_string(),
        password_hash: hash_password_with(password, argon2)?,
        name: name.map(|n| n.trim().to_string()),
        surname: surname.map(|s| s.trim().to_string()),
    })
}

/// 创建账号并关联已存在的档案
pub async fn create_account(
    storage: &dyn Storage,
    req: CreateAccountRequest,
    argon2: &Argon2Config,
) -> Result<Account> {
    req.validate()?;
    let profile = validate_role_relations(req.role, req.teacher_id, req.student_id)?;

    storage
        .create_account(NewAccount {
            username: req.username.trim().to_string(),
            password_hash: hash_password_with(&req.password, argon2)?,
            name: req.name.trim().to_string(),
            surname: req.surname.trim().to_string(),
            profile,
        })
        .await
}

/// 同时创建学生档案与学生账号
pub async fn create_account_for_student(
    storage: &dyn Storage,
    req: CreateStudentAccountRequest,
    argon2: &Argon2Config,
) -> Result<(Student, Account)> {
    req.validate()?;
    let credentials = credentials(&req.username, &req.password, req.name, req.surname, argon2)?;
    storage
        .create_student_with_account(req.student, credentials)
        .await
}

/// 同时创建教师档案与教师账号
pub async fn create_account_for_teacher(
    storage: &dyn Storage,
    req: CreateTeacherAccountRequest,
    argon2: &Argon2Config,
) -> Result<(Teacher, Account)> {
    req.validate()?;
    let credentials = credentials(&req.username, &req.password, req.name, req.surname, argon2)?;
    storage
        .create_teacher_with_account(req.teacher, credentials)
        .await
}

pub async fn handle_create_account(
    service: &AccountService,
    request: &HttpRequest,
    create_request: CreateAccountRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let account =
        create_account(storage.as_ref(), create_request, &service.get_config().argon2).await?;

    info!(
        "Account {} created with role {}",
        account.username,
        account.role()
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        account,
        "Account created successfully",
    )))
}

pub async fn handle_create_student_account(
    service: &AccountService,
    request: &HttpRequest,
    create_request: CreateStudentAccountRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (student, account) =
        create_account_for_student(storage.as_ref(), create_request, &service.get_config().argon2)
            .await?;

    info!(
        "Student {} created with account {}",
        student.id, account.username
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentAccountResponse { student, account },
        "Student account created successfully",
    )))
}

pub async fn handle_create_teacher_account(
    service: &AccountService,
    request: &HttpRequest,
    create_request: CreateTeacherAccountRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (teacher, account) =
        create_account_for_teacher(storage.as_ref(), create_request, &service.get_config().argon2)
            .await?;

    info!(
        "Teacher {} created with account {}",
        teacher.id, account.username
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        TeacherAccountResponse { teacher, account },
        "Teacher account created successfully",
    )))
}
