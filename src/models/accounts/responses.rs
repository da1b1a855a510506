use serde::Serialize;
use ts_rs::TS;

use super::entities::Account;
use crate::models::{students::entities::Student, teachers::entities::Teacher};

// 同时创建学生档案与账号的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct StudentAccountResponse {
    pub student: Student,
    pub account: Account,
}

// 同时创建教师档案与账号的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct TeacherAccountResponse {
    pub teacher: Teacher,
    pub account: Account,
}
