use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::accounts::requests::{
    AccountListParams, CreateAccountRequest, CreateStudentAccountRequest,
    CreateTeacherAccountRequest, UpdateAccountRequest,
};
use crate::services::AccountService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AccountService 实例
static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);

// HTTP处理程序
pub async fn list_accounts(
    req: HttpRequest,
    query: web::Query<AccountListParams>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .list_accounts(&req, query.into_inner())
        .await
}

pub async fn create_account(
    req: HttpRequest,
    account_data: web::Json<CreateAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .create_account(&req, account_data.into_inner())
        .await
}

pub async fn create_student_account(
    req: HttpRequest,
    account_data: web::Json<CreateStudentAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .create_student_account(&req, account_data.into_inner())
        .await
}

pub async fn create_teacher_account(
    req: HttpRequest,
    account_data: web::Json<CreateTeacherAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .create_teacher_account(&req, account_data.into_inner())
        .await
}

pub async fn get_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.get_account(&req, id.0).await
}

pub async fn update_account(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .update_account(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.delete_account(&req, id.0).await
}

// 配置路由（仅管理员）
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/accounts")
            .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_accounts))
                    .route(web::post().to(create_account)),
            )
            .service(web::resource("/students").route(web::post().to(create_student_account)))
            .service(web::resource("/teachers").route(web::post().to(create_teacher_account)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_account))
                    .route(web::put().to(update_account))
                    .route(web::delete().to(delete_account)),
            ),
    );
}
