use serde::Serialize;
use ts_rs::TS;

use crate::models::accounts::entities::{Account, AccountRole};

// 登录成功响应
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub role: AccountRole,
    pub teacher_id: Option<i64>,
    #[serde(rename = "alumnoId")]
    pub student_id: Option<i64>,
    pub access_token: String,
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(account: &Account, access_token: String, expires_in: i64) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            username: account.username.clone(),
            name: account.name.clone(),
            surname: account.surname.clone(),
            role: account.role(),
            teacher_id: account.teacher_id(),
            student_id: account.student_id(),
            access_token,
            expires_in,
        }
    }
}

// 登录失败响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

impl LoginErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AccountInfoResponse {
    pub account: Account,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::AccountProfile;

    #[test]
    fn test_login_response_field_names() {
        let now = chrono::Utc::now();
        let account = Account {
            id: 1,
            username: "ana.garcia".to_string(),
            password_hash: "hash".to_string(),
            name: "Ana".to_string(),
            surname: "Garcia".to_string(),
            profile: AccountProfile::Student { student_id: 12 },
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(LoginResponse::new(&account, "tok".into(), 900)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["role"], "student");
        assert_eq!(json["alumnoId"], 12);
        assert!(json["teacherId"].is_null());
        assert_eq!(json["accessToken"], "tok");
        assert_eq!(json["expiresIn"], 900);
        assert!(json.get("password_hash").is_none());
    }
}
