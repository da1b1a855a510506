use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    accounts::entities::{Account, AccountProfile},
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
};

/// 按角色收窄查询范围：学生只看自己的提交，教师只看自己布置的作业
pub fn scope_query(account: &Account, mut query: SubmissionListQuery) -> SubmissionListQuery {
    match account.profile {
        AccountProfile::Admin => {}
        AccountProfile::Teacher { teacher_id } => query.teacher_id = Some(teacher_id),
        AccountProfile::Student { student_id } => query.student_id = Some(student_id),
    }
    query
}

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let account = RequireJWT::current_account(request)?;
    let storage = service.get_storage(request)?;
    let submissions = storage
        .list_submissions(scope_query(&account, query.into()))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submissions,
        "Submissions retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(profile: AccountProfile) -> Account {
        let now = chrono::Utc::now();
        Account {
            id: 1,
            username: "someone".to_string(),
            password_hash: String::new(),
            name: "N".to_string(),
            surname: "S".to_string(),
            profile,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_student_cannot_widen_scope() {
        let query = SubmissionListQuery {
            page: 1,
            size: 20,
            student_id: Some(99),
            ..Default::default()
        };
        let scoped = scope_query(&account(AccountProfile::Student { student_id: 4 }), query);
        assert_eq!(scoped.student_id, Some(4));
        assert_eq!(scoped.teacher_id, None);
    }

    #[test]
    fn test_teacher_and_admin_scope() {
        let scoped = scope_query(
            &account(AccountProfile::Teacher { teacher_id: 2 }),
            SubmissionListQuery::default(),
        );
        assert_eq!(scoped.teacher_id, Some(2));

        let scoped = scope_query(
            &account(AccountProfile::Admin),
            SubmissionListQuery {
                student_id: Some(3),
                ..Default::default()
            },
        );
        assert_eq!(scoped.student_id, Some(3));
        assert_eq!(scoped.teacher_id, None);
    }
}
