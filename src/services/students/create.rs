use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, students::requests::CreateStudentRequest};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    create_request: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    create_request.validate()?;
    let storage = service.get_storage(request)?;
    let student = storage.create_student(create_request).await?;

    tracing::info!("Student {} created", student.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        student,
        "Student created successfully",
    )))
}
