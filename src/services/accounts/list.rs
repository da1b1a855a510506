use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::{ApiResponse, accounts::requests::AccountListParams};

pub async fn list_accounts(
    service: &AccountService,
    request: &HttpRequest,
    query: AccountListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let accounts = storage.list_accounts(query.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        accounts,
        "Accounts retrieved successfully",
    )))
}
