pub mod create;
pub mod detail;
pub mod grade;
pub mod list;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListParams,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    // 学生提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        create_request: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, create_request).await
    }

    // 学生上传（替换）提交附件
    pub async fn upload_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::upload_attachment(self, request, id, payload).await
    }

    pub async fn get_submission(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, id).await
    }

    pub async fn download_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::download_attachment(self, request, id).await
    }

    // 作业布置者评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        id: i64,
        grade_request: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, id, grade_request).await
    }
}
