use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, teachers::requests::TeacherListParams};

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teachers = storage.list_teachers(query.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teachers,
        "Teachers retrieved successfully",
    )))
}
