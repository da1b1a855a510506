use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, accounts::entities::AccountProfile};
use crate::services::access::ensure_self_or_admin;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = storage
        .get_teacher(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Teacher {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teacher,
        "Teacher retrieved successfully",
    )))
}

pub async fn get_teacher_courses(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    ensure_self_or_admin(&account, AccountProfile::Teacher { teacher_id: id })?;

    let storage = service.get_storage(request)?;
    let courses = storage.get_teacher_courses(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        courses,
        "Teacher courses retrieved successfully",
    )))
}
