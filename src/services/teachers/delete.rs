use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.delete_teacher(id).await?;
    if let Some(cache) = crate::services::cache_from_request(request) {
        cache.invalidate_all().await;
    }

    tracing::info!("Teacher {} deleted together with its account", id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
}
