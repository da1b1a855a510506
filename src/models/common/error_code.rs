use serde::Serialize;
use ts_rs::TS;

use crate::errors::AcademyError;

// 业务响应码（HTTP 状态码之外的细分代码）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,

    // 认证授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,

    // 资源
    NotFound = 3000,
    Conflict = 3009,

    // 限流
    RateLimitExceeded = 4029,

    InternalServerError = 5000,
}

impl From<&AcademyError> for ErrorCode {
    fn from(error: &AcademyError) -> Self {
        match error {
            AcademyError::Validation(_) | AcademyError::DateParse(_) => ErrorCode::ValidationFailed,
            AcademyError::Authentication(_) => ErrorCode::AuthFailed,
            AcademyError::Authorization(_) => ErrorCode::Forbidden,
            AcademyError::NotFound(_) => ErrorCode::NotFound,
            AcademyError::Conflict(_) => ErrorCode::Conflict,
            AcademyError::RateLimited(_) => ErrorCode::RateLimitExceeded,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl ErrorCode {
    /// 登录接口对外暴露的字符串错误码
    pub fn login_code(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::BadRequest => "VALIDATION_ERROR",
            ErrorCode::AuthFailed | ErrorCode::Unauthorized => "INVALID_CREDENTIALS",
            _ => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_codes() {
        let code = ErrorCode::from(&AcademyError::validation("blank"));
        assert_eq!(code.login_code(), "VALIDATION_ERROR");
        let code = ErrorCode::from(&AcademyError::authentication("bad"));
        assert_eq!(code.login_code(), "INVALID_CREDENTIALS");
        let code = ErrorCode::from(&AcademyError::database_operation("down"));
        assert_eq!(code.login_code(), "INTERNAL_ERROR");
    }
}
