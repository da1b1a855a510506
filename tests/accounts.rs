mod common;

use common::*;
use rust_academy_next::errors::AcademyError;
use rust_academy_next::models::accounts::entities::{AccountProfile, AccountRole};
use rust_academy_next::models::accounts::requests::{
    CreateAccountRequest, CreateStudentAccountRequest, UpdateAccountRequest,
};
use rust_academy_next::models::auth::requests::LoginRequest;
use rust_academy_next::models::students::requests::CreateStudentRequest;
use rust_academy_next::services::accounts::create::{create_account, create_account_for_student};
use rust_academy_next::services::accounts::update::update_account;
use rust_academy_next::services::auth::login::authenticate;
use rust_academy_next::storage::Storage;
use rust_academy_next::utils::password::verify_password;

fn account_request(username: &str, role: AccountRole) -> CreateAccountRequest {
    CreateAccountRequest {
        username: username.to_string(),
        password: "correct-horse".to_string(),
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        role,
        teacher_id: None,
        student_id: None,
    }
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_password_is_hashed() {
    let storage = storage().await;
    let account = create_account(
        &storage,
        account_request("root", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap();

    assert_eq!(account.profile, AccountProfile::Admin);
    assert_ne!(account.password_hash, "correct-horse");
    assert!(account.password_hash.starts_with("$argon2"));
    assert!(verify_password("correct-horse", &account.password_hash));
}

#[tokio::test]
async fn test_role_requires_matching_profile() {
    let storage = storage().await;
    let teacher = teacher(&storage, "x").await;

    let err = create_account(
        &storage,
        account_request("teach", AccountRole::Teacher),
        &fast_argon2(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    let mut req = account_request("teach", AccountRole::Teacher);
    req.teacher_id = Some(9999);
    let err = create_account(&storage, req, &fast_argon2()).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));

    let mut req = account_request("teach", AccountRole::Teacher);
    req.teacher_id = Some(teacher.id);
    let account = create_account(&storage, req, &fast_argon2()).await.unwrap();
    assert_eq!(account.teacher_id(), Some(teacher.id));
    assert_eq!(account.student_id(), None);

    // 档案只能关联一个账号
    let mut req = account_request("teach2", AccountRole::Teacher);
    req.teacher_id = Some(teacher.id);
    let err = create_account(&storage, req, &fast_argon2()).await.unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_username_is_unique() {
    let storage = storage().await;
    create_account(
        &storage,
        account_request("taken", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap();

    let err = create_account(
        &storage,
        account_request("taken", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_student_account_created_with_profile() {
    let storage = storage().await;
    let (student, account) = create_account_for_student(
        &storage,
        CreateStudentAccountRequest {
            username: "grace".to_string(),
            password: "compiler-1952".to_string(),
            name: None,
            surname: None,
            student: CreateStudentRequest {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: "grace@example.com".to_string(),
                phone: None,
            },
        },
        &fast_argon2(),
    )
    .await
    .unwrap();

    assert_eq!(account.profile, AccountProfile::Student { student_id: student.id });
    assert_eq!(account.name, "Grace");
    assert_eq!(account.surname, "Hopper");

    // 删除学生档案时一并删除账号
    storage.delete_student(student.id).await.unwrap();
    assert!(storage.get_account_by_id(account.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_role_change_relinks_profile() {
    let storage = storage().await;
    let teacher = teacher(&storage, "y").await;
    let account = create_account(
        &storage,
        account_request("switch", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap();

    let err = update_account(
        &storage,
        account.id,
        UpdateAccountRequest {
            role: Some(AccountRole::Teacher),
            ..Default::default()
        },
        &fast_argon2(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    let updated = update_account(
        &storage,
        account.id,
        UpdateAccountRequest {
            role: Some(AccountRole::Teacher),
            teacher_id: Some(teacher.id),
            password: Some("new-password".to_string()),
            ..Default::default()
        },
        &fast_argon2(),
    )
    .await
    .unwrap();
    assert_eq!(updated.profile, AccountProfile::Teacher { teacher_id: teacher.id });
    assert!(verify_password("new-password", &updated.password_hash));
}

#[tokio::test]
async fn test_linked_profile_cannot_be_shared() {
    let storage = storage().await;
    let first = teacher(&storage, "first").await;
    let second = teacher(&storage, "second").await;
    let owner = create_account(
        &storage,
        CreateAccountRequest {
            teacher_id: Some(first.id),
            ..account_request("owner", AccountRole::Teacher)
        },
        &fast_argon2(),
    )
    .await
    .unwrap();
    let other = create_account(
        &storage,
        CreateAccountRequest {
            teacher_id: Some(second.id),
            ..account_request("other", AccountRole::Teacher)
        },
        &fast_argon2(),
    )
    .await
    .unwrap();

    let err = update_account(
        &storage,
        other.id,
        UpdateAccountRequest {
            teacher_id: Some(first.id),
            ..Default::default()
        },
        &fast_argon2(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));

    let unchanged = storage.get_account_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.profile, AccountProfile::Teacher { teacher_id: second.id });
    // 重新关联到自己已有的档案不算冲突
    let same = update_account(
        &storage,
        owner.id,
        UpdateAccountRequest {
            teacher_id: Some(first.id),
            ..Default::default()
        },
        &fast_argon2(),
    )
    .await
    .unwrap();
    assert_eq!(same.profile, AccountProfile::Teacher { teacher_id: first.id });
}

#[tokio::test]
async fn test_teacher_to_student_drops_teacher_link() {
    let storage = storage().await;
    let teacher = teacher(&storage, "z").await;
    let pupil = student(&storage, "z").await;
    let account = create_account(
        &storage,
        CreateAccountRequest {
            teacher_id: Some(teacher.id),
            ..account_request("convert", AccountRole::Teacher)
        },
        &fast_argon2(),
    )
    .await
    .unwrap();

    let updated = update_account(
        &storage,
        account.id,
        UpdateAccountRequest {
            role: Some(AccountRole::Student),
            student_id: Some(pupil.id),
            ..Default::default()
        },
        &fast_argon2(),
    )
    .await
    .unwrap();
    assert_eq!(updated.profile, AccountProfile::Student { student_id: pupil.id });
    assert_eq!(updated.teacher_id(), None);

    let stored = storage.get_account_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.teacher_id(), None);
    assert_eq!(stored.student_id(), Some(pupil.id));

    // 释放出的教师档案可以被新账号关联
    let relinked = create_account(
        &storage,
        CreateAccountRequest {
            teacher_id: Some(teacher.id),
            ..account_request("successor", AccountRole::Teacher)
        },
        &fast_argon2(),
    )
    .await
    .unwrap();
    assert_eq!(relinked.profile, AccountProfile::Teacher { teacher_id: teacher.id });
}

#[tokio::test]
async fn test_authenticate() {
    let storage = storage().await;
    create_account(
        &storage,
        account_request("login-user", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap();

    let account = authenticate(&storage, &login("login-user", "correct-horse"))
        .await
        .unwrap();
    assert_eq!(account.username, "login-user");

    let stored = storage.get_account_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());

    let wrong_password = authenticate(&storage, &login("login-user", "wrong-horse"))
        .await
        .unwrap_err();
    let unknown_user = authenticate(&storage, &login("nobody", "correct-horse"))
        .await
        .unwrap_err();
    assert!(matches!(wrong_password, AcademyError::Authentication(_)));
    assert_eq!(wrong_password.message(), unknown_user.message());

    let err = authenticate(&storage, &login("", "")).await.unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));
}
