use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, accounts::entities::AccountProfile};
use crate::services::access::ensure_course_member;

pub async fn list_course_teachers(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let teachers = storage.get_course_teachers(id).await?;
    ensure_course_member(storage.as_ref(), &account, id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teachers,
        "Course teachers retrieved successfully",
    )))
}

pub async fn assign_teacher(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.assign_teacher(id, teacher_id).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success_empty(
        "Teacher assigned to course successfully",
    )))
}

pub async fn remove_teacher(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.remove_teacher(id, teacher_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Teacher removed from course successfully",
    )))
}

pub async fn list_course_students(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    // 先确认课程存在，再判断访问权
    let students = storage.get_course_students(id).await?;
    ensure_course_member(storage.as_ref(), &account, id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        students,
        "Course students retrieved successfully",
    )))
}

pub async fn enroll_student(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.enroll_student(id, student_id).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success_empty(
        "Student enrolled successfully",
    )))
}

pub async fn unenroll_student(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.unenroll_student(id, student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Student unenrolled successfully",
    )))
}

pub async fn list_course_assignments(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let assignments = storage.list_course_assignments(id).await?;
    ensure_course_member(storage.as_ref(), &account, id).await?;

    let assignments = match account.profile {
        AccountProfile::Student { student_id } => assignments
            .into_iter()
            .filter(|a| a.accepts_student(student_id, true))
            .collect(),
        _ => assignments,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Course assignments retrieved successfully",
    )))
}
