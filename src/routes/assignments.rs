use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::services::AssignmentService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, id.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, id.0).await
}

pub async fn add_student(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .add_student(&req, id.0, student_id.0)
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .remove_student(&req, id.0, student_id.0)
        .await
}

pub async fn upload_attachment(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .upload_attachment(&req, id.0, payload)
        .await
}

pub async fn download_attachment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.download_attachment(&req, id.0).await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    let teacher_or_admin = || middlewares::RequireRole::new_any(AccountRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::post().to(create_assignment).wrap(teacher_or_admin())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment).wrap(teacher_or_admin()))
                    .route(web::delete().to(delete_assignment).wrap(teacher_or_admin())),
            )
            .service(
                web::resource("/{id}/attachment")
                    .route(
                        web::post()
                            .to(upload_attachment)
                            .wrap(teacher_or_admin())
                            .wrap(middlewares::RateLimit::upload()),
                    )
                    .route(web::get().to(download_attachment)),
            )
            .service(
                web::resource("/{id}/students/{student_id}")
                    .route(web::post().to(add_student).wrap(teacher_or_admin()))
                    .route(web::delete().to(remove_student).wrap(teacher_or_admin())),
            ),
    );
}
