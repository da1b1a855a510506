use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, accounts::entities::AccountProfile};
use crate::services::access::ensure_self_or_admin;

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = storage
        .get_student(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Student {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student retrieved successfully",
    )))
}

pub async fn get_student_courses(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    ensure_self_or_admin(&account, AccountProfile::Student { student_id: id })?;

    let storage = service.get_storage(request)?;
    let courses = storage.get_student_courses(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        courses,
        "Student courses retrieved successfully",
    )))
}
