use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::courses::requests::{
    CourseListParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::services::CourseService;
use crate::utils::{SafeIDI64, SafeStudentIdI64, SafeTeacherIdI64};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, id.0).await
}

pub async fn list_course_teachers(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_course_teachers(&req, id.0).await
}

pub async fn assign_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.assign_teacher(&req, id.0, teacher_id.0).await
}

pub async fn remove_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.remove_teacher(&req, id.0, teacher_id.0).await
}

pub async fn list_course_students(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_course_students(&req, id.0).await
}

pub async fn enroll_student(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll_student(&req, id.0, student_id.0).await
}

pub async fn unenroll_student(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .unenroll_student(&req, id.0, student_id.0)
        .await
}

pub async fn list_course_assignments(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_course_assignments(&req, id.0).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    let admin_only = || middlewares::RequireRole::new_any(AccountRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course).wrap(admin_only()))
                    .route(web::delete().to(delete_course).wrap(admin_only())),
            )
            // 任课教师，成员校验在服务层完成
            .service(web::resource("/{id}/teachers").route(web::get().to(list_course_teachers)))
            .service(
                web::resource("/{id}/teachers/{teacher_id}")
                    .route(web::post().to(assign_teacher).wrap(admin_only()))
                    .route(web::delete().to(remove_teacher).wrap(admin_only())),
            )
            // 选课学生，成员校验在服务层完成
            .service(web::resource("/{id}/students").route(web::get().to(list_course_students)))
            .service(
                web::resource("/{id}/students/{student_id}")
                    .route(web::post().to(enroll_student).wrap(admin_only()))
                    .route(web::delete().to(unenroll_student).wrap(admin_only())),
            )
            .service(
                web::resource("/{id}/assignments").route(web::get().to(list_course_assignments)),
            ),
    );
}
