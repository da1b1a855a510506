use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, assignments::requests::UpdateAssignmentRequest};
use crate::services::access::{ensure_can_manage_assignment, ensure_can_view_assignment};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_view_assignment(storage.as_ref(), &account, &assignment).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment retrieved successfully",
    )))
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_manage_assignment(&account, &assignment)?;

    let assignment = storage.update_assignment(id, update_request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment updated successfully",
    )))
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_manage_assignment(&account, &assignment)?;

    storage.delete_assignment(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Assignment deleted successfully",
    )))
}
