use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.delete_student(id).await?;
    if let Some(cache) = crate::services::cache_from_request(request) {
        cache.invalidate_all().await;
    }

    tracing::info!("Student {} deleted together with its account", id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
}
