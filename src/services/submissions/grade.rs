use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, submissions::requests::GradeSubmissionRequest};

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    id: i64,
    grade_request: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let teacher_id = account.require_teacher_id()?;

    let storage = service.get_storage(request)?;
    let submission = storage
        .grade_submission(id, teacher_id, grade_request, chrono::Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission graded successfully",
    )))
}
