use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, JwtConfig};
use crate::models::accounts::entities::AccountRole;

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Token 类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // 账号 ID
    pub role: AccountRole,     // 签发时的角色
    pub token_type: TokenKind, // access / refresh
    pub exp: usize,            // 过期时间戳
    pub iat: usize,            // 签发时间戳
}

impl Claims {
    pub fn account_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// Token 对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn config() -> &'static JwtConfig {
        &AppConfig::get().jwt
    }

    /// 用指定密钥签发 token
    pub fn issue(
        secret: &str,
        account_id: i64,
        role: AccountRole,
        kind: TokenKind,
        ttl: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role,
            token_type: kind,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// 用指定密钥校验 token 并检查类型
    pub fn verify(
        secret: &str,
        token: &str,
        expected: TokenKind,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;
        if claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    /// access token 有效期（秒）
    pub fn access_token_ttl_secs() -> i64 {
        Self::config().access_token_expiry * 60
    }

    pub fn generate_access_token(
        account_id: i64,
        role: AccountRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = Self::config();
        Self::issue(
            &config.secret,
            account_id,
            role,
            TokenKind::Access,
            chrono::Duration::minutes(config.access_token_expiry),
        )
    }

    pub fn generate_token_pair(
        account_id: i64,
        role: AccountRole,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let config = Self::config();
        let access_token = Self::generate_access_token(account_id, role)?;
        let refresh_token = Self::issue(
            &config.secret,
            account_id,
            role,
            TokenKind::Refresh,
            chrono::Duration::days(config.refresh_token_expiry),
        )?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::config().secret, token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::config().secret, token, TokenKind::Refresh)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_TOKEN_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_issue_and_verify() {
        let token = JwtUtils::issue(
            SECRET,
            42,
            AccountRole::Teacher,
            TokenKind::Access,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify(SECRET, &token, TokenKind::Access).unwrap();
        assert_eq!(claims.account_id(), Some(42));
        assert_eq!(claims.role, AccountRole::Teacher);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let token = JwtUtils::issue(
            SECRET,
            1,
            AccountRole::Admin,
            TokenKind::Refresh,
            chrono::Duration::days(1),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &token, TokenKind::Access).is_err());
        assert!(JwtUtils::verify(SECRET, &token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::issue(
            SECRET,
            1,
            AccountRole::Student,
            TokenKind::Access,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify("another-secret", &token, TokenKind::Access).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::issue(
            SECRET,
            1,
            AccountRole::Student,
            TokenKind::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &token, TokenKind::Access).is_err());
    }
}
