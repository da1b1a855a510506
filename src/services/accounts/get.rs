use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::errors::AcademyError;
use crate::models::ApiResponse;

pub async fn get_account(
    service: &AccountService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let account = storage
        .get_account_by_id(id)
        .await?
        .ok_or_else(|| AcademyError::not_found(format!("Account {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        account,
        "Account retrieved successfully",
    )))
}
