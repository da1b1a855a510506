use serde::Deserialize;
use ts_rs::TS;

// 登录请求（来自HTTP请求）
//
// 字段缺省为空串，由登录流程统一报 VALIDATION_ERROR
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
