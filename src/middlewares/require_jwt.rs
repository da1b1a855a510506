/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，解析出当前账号并放入请求扩展，
 * 处理程序通过 [`RequireJWT::extract_account`] 读取。
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_courses))
 * ```
 *
 * 账号解析顺序：对象缓存（按 token）→ 存储。账号已被删除的 token 视为无效。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::errors::{AcademyError, Result};
use crate::models::accounts::entities::Account;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

pub(crate) fn account_cache_key(token: &str) -> String {
    format!("account:{token}")
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// 提取并验证 access token，返回当前账号
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Account> {
    let token = bearer_token(req).ok_or_else(|| {
        AcademyError::authentication("Missing or invalid Authorization header")
    })?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AcademyError::authentication("Invalid or expired token")
    })?;
    let account_id = claims
        .account_id()
        .ok_or_else(|| AcademyError::authentication("Invalid account ID in token"))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let cache_key = account_cache_key(token);

    if let Some(cache) = &cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<Account>(&json) {
                Ok(account) if account.id == account_id => return Ok(account),
                _ => {
                    cache.remove(&cache_key).await;
                    debug!("Dropped unusable cached account for token");
                }
            },
            CacheResult::NotFound => {}
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AcademyError::database_config("Storage not found in app data"))?;

    let account = storage
        .get_account_by_id(account_id)
        .await?
        .ok_or_else(|| AcademyError::authentication("Account no longer exists"))?;

    if let Some(cache) = &cache
        && let Ok(json) = serde_json::to_string(&account)
    {
        cache
            .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(account)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求交给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            match extract_and_validate_jwt(&req).await {
                Ok(account) => {
                    debug!("JWT authentication successful for account {}", account.id);
                    req.extensions_mut().insert(account);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(create_error_response(err).map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前账号（须在 RequireJWT 之后调用）
    pub fn extract_account(req: &actix_web::HttpRequest) -> Option<Account> {
        req.extensions().get::<Account>().cloned()
    }

    /// 当前账号，缺失时返回 Authentication 错误
    pub fn current_account(req: &actix_web::HttpRequest) -> Result<Account> {
        Self::extract_account(req)
            .ok_or_else(|| AcademyError::authentication("Authentication required"))
    }
}
