pub mod attachment;
pub mod create;
pub mod detail;
pub mod targets;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{AcademyError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    pub(crate) async fn find_assignment(storage: &dyn Storage, id: i64) -> Result<Assignment> {
        storage
            .get_assignment(id)
            .await?
            .ok_or_else(|| AcademyError::not_found(format!("Assignment {id} not found")))
    }

    // 教师在任教课程下布置作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        create_request: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, create_request).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        detail::update_assignment(self, request, id, update_request).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::delete_assignment(self, request, id).await
    }

    // 显式指派学生
    pub async fn add_student(
        &self,
        request: &HttpRequest,
        id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        targets::add_student(self, request, id, student_id).await
    }

    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        targets::remove_student(self, request, id, student_id).await
    }

    pub async fn upload_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        attachment::upload_attachment(self, request, id, payload).await
    }

    pub async fn download_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        attachment::download_attachment(self, request, id).await
    }
}
