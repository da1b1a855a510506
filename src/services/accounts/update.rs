use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::config::Argon2Config;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    accounts::{
        entities::Account,
        requests::{AccountChanges, UpdateAccountRequest},
    },
};
use crate::storage::Storage;
use crate::utils::password::hash_password_with;

/// 更新账号；角色与档案链接的组合由存储层在事务内校验
pub async fn update_account(
    storage: &dyn Storage,
    id: i64,
    req: UpdateAccountRequest,
    argon2: &Argon2Config,
) -> Result<Account> {
    req.validate()?;

    let password_hash = match req.password.as_deref() {
        Some(password) => Some(hash_password_with(password, argon2)?),
        None => None,
    };

    storage
        .update_account(
            id,
            AccountChanges {
                username: req.username.map(|u| u.trim().to_string()),
                password_hash,
                name: req.name.map(|n| n.trim().to_string()),
                surname: req.surname.map(|s| s.trim().to_string()),
                role: req.role,
                teacher_id: req.teacher_id,
                student_id: req.student_id,
            },
        )
        .await
}

pub async fn handle_update_account(
    service: &AccountService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateAccountRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let account =
        update_account(storage.as_ref(), id, update_request, &service.get_config().argon2).await?;
    service.invalidate_cached_accounts(request).await;

    tracing::info!("Account {} updated", account.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        account,
        "Account updated successfully",
    )))
}
