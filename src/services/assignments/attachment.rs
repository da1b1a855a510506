use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::{ensure_can_manage_assignment, ensure_can_view_assignment};
use crate::utils::attachment::{attachment_response, read_multipart_attachment};

pub async fn upload_attachment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_manage_assignment(&account, &assignment)?;

    let attachment = read_multipart_attachment(payload, &service.get_config().upload).await?;
    let assignment = storage.set_assignment_attachment(id, attachment).await?;

    tracing::info!("Attachment uploaded for assignment {}", id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Attachment uploaded successfully",
    )))
}

pub async fn download_attachment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignment = AssignmentService::find_assignment(storage.as_ref(), id).await?;
    ensure_can_view_assignment(storage.as_ref(), &account, &assignment).await?;

    let attachment = storage
        .get_assignment_attachment(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Assignment {id} has no attachment")))?;
    Ok(attachment_response(attachment))
}
