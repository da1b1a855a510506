use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, submissions::requests::CreateSubmissionRequest};
use crate::utils::attachment::read_multipart_attachment;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    create_request: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let student_id = account.require_student_id()?;

    let storage = service.get_storage(request)?;
    let submission = storage
        .create_submission(student_id, create_request, chrono::Utc::now())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        submission,
        "Submission created successfully",
    )))
}

pub async fn upload_attachment(
    service: &SubmissionService,
    request: &HttpRequest,
    id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let student_id = account.require_student_id()?;

    let attachment = read_multipart_attachment(payload, &service.get_config().upload).await?;
    let storage = service.get_storage(request)?;
    let submission = storage
        .upload_submission_attachment(id, student_id, attachment, chrono::Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Attachment uploaded successfully",
    )))
}
