use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, ResponseError};

use crate::errors::{AcademyError, Result};
use crate::models::{
    ErrorCode,
    accounts::entities::Account,
    auth::{
        requests::LoginRequest,
        responses::{LoginErrorResponse, LoginResponse},
    },
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// 校验用户名与密码
///
/// 空字段返回 Validation；用户不存在与密码错误返回同一个 Authentication 错误。
pub async fn authenticate(storage: &dyn Storage, login_request: &LoginRequest) -> Result<Account> {
    let username = login_request.username.trim();
    if username.is_empty() || login_request.password.is_empty() {
        return Err(AcademyError::validation(
            "Username and password are required",
        ));
    }

    let account = storage
        .get_account_by_username(username)
        .await?
        .ok_or_else(|| AcademyError::authentication(INVALID_CREDENTIALS))?;

    if !verify_password(&login_request.password, &account.password_hash) {
        return Err(AcademyError::authentication(INVALID_CREDENTIALS));
    }

    if let Err(e) = storage.update_last_login(account.id).await {
        tracing::warn!("Failed to update last login for {}: {}", account.username, e);
    }

    Ok(account)
}

fn login_failure(error: AcademyError) -> HttpResponse {
    let status = error.status_code();
    let message = if status.is_server_error() {
        tracing::error!("Login failed: {}", error);
        "Login failed, please try again later"
    } else {
        error.message()
    };
    HttpResponse::build(status).json(LoginErrorResponse::new(
        ErrorCode::from(&error).login_code(),
        message,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let account = match authenticate(storage.as_ref(), &login_request).await {
        Ok(account) => account,
        Err(e) => {
            tracing::info!("Login rejected for '{}': {}", login_request.username, e);
            return Ok(login_failure(e));
        }
    };

    let token_pair = match JwtUtils::generate_token_pair(account.id, account.role()) {
        Ok(pair) => pair,
        Err(e) => {
            return Ok(login_failure(AcademyError::serialization(format!(
                "Failed to generate JWT token: {e}"
            ))));
        }
    };

    tracing::info!("Account {} logged in successfully", account.username);

    let expires_in = JwtUtils::access_token_ttl_secs();
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(LoginResponse::new(&account, token_pair.access_token, expires_in)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_login_failure_codes() {
        let response = login_failure(AcademyError::validation("missing"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = login_failure(AcademyError::authentication(INVALID_CREDENTIALS));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = login_failure(AcademyError::database_operation("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
