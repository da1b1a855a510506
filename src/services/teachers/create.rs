use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, teachers::requests::CreateTeacherRequest};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    create_request: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    create_request.validate()?;
    let storage = service.get_storage(request)?;
    let teacher = storage.create_teacher(create_request).await?;

    tracing::info!("Teacher {} created", teacher.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        teacher,
        "Teacher created successfully",
    )))
}
