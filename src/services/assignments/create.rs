use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, assignments::requests::CreateAssignmentRequest,
    submissions::entities::event_date,
};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    create_request: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let teacher_id = account.require_teacher_id()?;

    let storage = service.get_storage(request)?;
    let today = event_date(chrono::Utc::now());
    let assignment = storage
        .create_assignment(teacher_id, create_request, today)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        assignment,
        "Assignment created successfully",
    )))
}
