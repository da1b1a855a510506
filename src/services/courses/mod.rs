pub mod crud;
pub mod relations;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseListParams,
    ) -> ActixResult<HttpResponse> {
        crud::list_courses(self, request, query).await
    }

    pub async fn get_course(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        crud::get_course(self, request, id).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        create_request: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_course(self, request, create_request).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_course(self, request, id, update_request).await
    }

    pub async fn delete_course(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        crud::delete_course(self, request, id).await
    }

    pub async fn list_course_teachers(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::list_course_teachers(self, request, id).await
    }

    pub async fn assign_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::assign_teacher(self, request, id, teacher_id).await
    }

    pub async fn remove_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::remove_teacher(self, request, id, teacher_id).await
    }

    pub async fn list_course_students(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::list_course_students(self, request, id).await
    }

    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::enroll_student(self, request, id, student_id).await
    }

    pub async fn unenroll_student(
        &self,
        request: &HttpRequest,
        id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::unenroll_student(self, request, id, student_id).await
    }

    // 课程下的作业；学生只能看到面向自己的作业
    pub async fn list_course_assignments(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        relations::list_course_assignments(self, request, id).await
    }
}
