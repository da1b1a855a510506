use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, students::requests::StudentListParams};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let students = storage.list_students(query.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        students,
        "Students retrieved successfully",
    )))
}
