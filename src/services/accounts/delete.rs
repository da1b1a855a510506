use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::ApiResponse;

pub async fn delete_account(
    service: &AccountService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    storage.delete_account(id).await?;
    service.invalidate_cached_accounts(request).await;

    tracing::info!("Account {} deleted", id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Account deleted successfully")))
}
