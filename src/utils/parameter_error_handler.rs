use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::errors::ErrorBody;

fn bad_request(detail: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: &detail,
        code: "E007",
        timestamp: chrono::Utc::now(),
    })
}

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    tracing::debug!("JSON payload rejected: {}", err);
    let response = bad_request(format!("Invalid JSON body: {err}"));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    tracing::debug!("Query parameters rejected: {}", err);
    let response = bad_request(format!("Invalid query parameters: {err}"));
    InternalError::from_response(err, response).into()
}
