use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, students::requests::UpdateStudentRequest};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    update_request.validate()?;
    let storage = service.get_storage(request)?;
    let student = storage.update_student(id, update_request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student updated successfully",
    )))
}
