use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::AcademyError;
use crate::models::{
    ApiResponse,
    courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let courses = storage.list_courses(query.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        courses,
        "Courses retrieved successfully",
    )))
}

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let course = storage
        .get_course(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Course {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course retrieved successfully",
    )))
}

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    create_request: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    create_request.validate()?;
    let storage = service.get_storage(request)?;
    let course = storage.create_course(create_request).await?;

    info!("Course {} ({}) created", course.id, course.name);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        course,
        "Course created successfully",
    )))
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    update_request.validate()?;
    let storage = service.get_storage(request)?;
    let course = storage.update_course(id, update_request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course updated successfully",
    )))
}

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.delete_course(id).await?;

    info!("Course {} deleted", id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
}
