//! 路径参数提取器
//!
//! 解析失败时直接返回 400 JSON 错误，而不是 actix 默认的纯文本 404。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::AcademyError;

macro_rules! define_safe_i64_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_i64(req, $param).map($name).map_err(Into::into))
                }
            }
        )*
    };
}

fn parse_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, AcademyError> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| AcademyError::validation(format!("Missing path parameter '{param}'")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AcademyError::validation(format!(
            "Path parameter '{param}' must be a positive integer"
        ))),
    }
}

define_safe_i64_extractor! {
    SafeIDI64 => "id",
    SafeTeacherIdI64 => "teacher_id",
    SafeStudentIdI64 => "student_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_parses_positive_id() {
        let req = TestRequest::default().param("id", "15").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeIDI64(15));
    }

    #[actix_web::test]
    async fn test_rejects_invalid_ids() {
        for raw in ["0", "-3", "abc"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_named_params() {
        let req = TestRequest::default()
            .param("id", "1")
            .param("student_id", "8")
            .to_http_request();
        assert_eq!(SafeStudentIdI64::extract(&req).await.unwrap().0, 8);
    }
}
