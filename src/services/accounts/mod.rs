pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::accounts::requests::{
    AccountListParams, CreateAccountRequest, CreateStudentAccountRequest,
    CreateTeacherAccountRequest, UpdateAccountRequest,
};
use crate::storage::Storage;

pub struct AccountService {
    storage: Option<Arc<dyn Storage>>,
}

impl AccountService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 账号变更后清空按 token 缓存的账号，令新角色/档案立即生效
    pub(crate) async fn invalidate_cached_accounts(&self, request: &HttpRequest) {
        if let Some(cache) = super::cache_from_request(request) {
            cache.invalidate_all().await;
        }
    }

    pub async fn list_accounts(
        &self,
        request: &HttpRequest,
        query: AccountListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_accounts(self, request, query).await
    }

    pub async fn get_account(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_account(self, request, id).await
    }

    // 创建账号并关联已有档案
    pub async fn create_account(
        &self,
        request: &HttpRequest,
        create_request: CreateAccountRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_account(self, request, create_request).await
    }

    // 同时创建学生档案与账号
    pub async fn create_student_account(
        &self,
        request: &HttpRequest,
        create_request: CreateStudentAccountRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_student_account(self, request, create_request).await
    }

    // 同时创建教师档案与账号
    pub async fn create_teacher_account(
        &self,
        request: &HttpRequest,
        create_request: CreateTeacherAccountRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_teacher_account(self, request, create_request).await
    }

    pub async fn update_account(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateAccountRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_account(self, request, id, update_request).await
    }

    pub async fn delete_account(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_account(self, request, id).await
    }
}
