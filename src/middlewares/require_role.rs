/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用：
 *
 * ```rust,ignore
 * web::scope("/api/v1/teachers")
 *     .wrap(RequireRole::new_any(AccountRole::admin_roles()))
 *     .wrap(RequireJWT)
 * ```
 *
 * actix 中后注册的 wrap 先执行，因此 RequireJWT 写在外层。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::errors::AcademyError;
use crate::models::accounts::entities::{Account, AccountRole};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<AccountRole>,
}

impl RequireRole {
    /// 只允许单一角色
    pub fn new(role: &AccountRole) -> Self {
        Self {
            required_roles: vec![*role],
        }
    }

    /// 允许任一角色
    pub fn new_any(roles: &[&AccountRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    fn permits(required_roles: &[AccountRole], role: AccountRole) -> bool {
        required_roles.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<AccountRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles.clone();

        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            let account = req.extensions().get::<Account>().map(|a| (a.id, a.role()));

            match account {
                Some((_, role)) if RequireRole::permits(&required_roles, role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some((account_id, role)) => {
                    info!(
                        "Access denied for account {} (role: {}). Required roles: {:?}",
                        account_id, role, required_roles
                    );
                    Ok(req.into_response(
                        create_error_response(AcademyError::authorization("Access denied"))
                            .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no account in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(AcademyError::authentication(
                            "Authentication required",
                        ))
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        let admin_only = RequireRole::new(&AccountRole::Admin);
        assert!(RequireRole::permits(&admin_only.required_roles, AccountRole::Admin));
        assert!(!RequireRole::permits(&admin_only.required_roles, AccountRole::Teacher));

        let teaching = RequireRole::new_any(AccountRole::teacher_roles());
        assert!(RequireRole::permits(&teaching.required_roles, AccountRole::Teacher));
        assert!(RequireRole::permits(&teaching.required_roles, AccountRole::Admin));
        assert!(!RequireRole::permits(&teaching.required_roles, AccountRole::Student));
    }
}
