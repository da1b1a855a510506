pub mod access;
pub mod accounts;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod students;
pub mod submissions;
pub mod teachers;

pub use accounts::AccountService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use students::StudentService;
pub use submissions::SubmissionService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{AcademyError, Result};
use crate::storage::Storage;

/// 从 app_data 取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AcademyError::database_config("Storage not found in app data"))
}

/// 从 app_data 取缓存实例（未配置时为 None）
pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}
