pub mod rate_limit;
pub mod require_jwt;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::AcademyError;

// 中间件拒绝请求时与业务错误使用同一响应体
pub(crate) fn create_error_response(error: AcademyError) -> HttpResponse {
    error.error_response()
}
