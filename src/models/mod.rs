pub mod accounts;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod students;
pub mod submissions;
pub mod teachers;

pub use common::{
    ApiResponse, Attachment, AttachmentInfo, ErrorCode, PaginatedResponse, PaginationInfo,
    PaginationQuery,
};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
