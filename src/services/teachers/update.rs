use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, teachers::requests::UpdateTeacherRequest};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    update_request.validate()?;
    let storage = service.get_storage(request)?;
    let teacher = storage.update_teacher(id, update_request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teacher,
        "Teacher updated successfully",
    )))
}
