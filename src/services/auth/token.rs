use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::auth::responses::{AccountInfoResponse, RefreshTokenResponse};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let refresh_token = JwtUtils::extract_refresh_token_from_cookie(request)
        .ok_or_else(|| AcademyError::authentication("Missing refresh token"))?;

    let claims = JwtUtils::verify_refresh_token(&refresh_token).map_err(|e| {
        tracing::info!("Refresh token rejected: {}", e);
        AcademyError::authentication("Login expired or invalid, please login again")
    })?;
    let account_id = claims
        .account_id()
        .ok_or_else(|| AcademyError::authentication("Invalid account ID in token"))?;

    // 以当前账号角色签发，而不是 refresh token 签发时的角色
    let storage = service.get_storage(request)?;
    let account = storage
        .get_account_by_id(account_id)
        .await?
        .ok_or_else(|| AcademyError::authentication("Account no longer exists"))?;

    let access_token = JwtUtils::generate_access_token(account.id, account.role())
        .map_err(|e| AcademyError::serialization(format!("Failed to generate JWT token: {e}")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshTokenResponse {
            access_token,
            expires_in: JwtUtils::access_token_ttl_secs(),
        },
        "Token refreshed successfully",
    )))
}

pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AccountInfoResponse { account },
        "Account information retrieved successfully",
    )))
}
