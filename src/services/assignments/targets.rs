use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::ensure_can_manage_assignment;

pub async fn add_student(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_manage_assignment(&account, &assignment)?;

    storage.assign_student_to_assignment(id, student_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_empty(
        "Student assigned successfully",
    )))
}

pub async fn remove_student(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_manage_assignment(&account, &assignment)?;

    storage.remove_student_from_assignment(id, student_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Student removed from assignment successfully",
    )))
}
