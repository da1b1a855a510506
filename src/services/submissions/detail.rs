use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::{AcademyError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, accounts::entities::Account, submissions::entities::Submission,
};
use crate::services::access::ensure_can_view_submission;
use crate::storage::Storage;

/// 读取提交并检查访问权
async fn visible_submission(storage: &dyn Storage, account: &Account, id: i64) -> Result<Submission> {
    let submission = storage
        .get_submission(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Submission {id} not found")))?;
    let assignment = storage
        .get_assignment(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            AcademyError::not_found(format!(
                "Assignment {} not found",
                submission.assignment_id
            ))
        })?;
    ensure_can_view_submission(account, &submission, &assignment)?;
    Ok(submission)
}

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let submission = visible_submission(storage.as_ref(), &account, id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}

pub async fn download_attachment(
    service: &SubmissionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    visible_submission(storage.as_ref(), &account, id).await?;

    let attachment = storage
        .get_submission_attachment(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Submission {id} has no attachment")))?;
    Ok(crate::utils::attachment::attachment_response(attachment))
}
