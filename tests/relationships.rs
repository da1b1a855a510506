mod common;

use common::*;
use rust_academy_next::errors::AcademyError;
use rust_academy_next::models::accounts::entities::AccountRole;
use rust_academy_next::models::accounts::requests::CreateAccountRequest;
use rust_academy_next::models::assignments::requests::UpdateAssignmentRequest;
use rust_academy_next::models::submissions::requests::CreateSubmissionRequest;
use rust_academy_next::services::access::ensure_course_member;
use rust_academy_next::services::accounts::create::create_account;
use rust_academy_next::storage::Storage;

#[tokio::test]
async fn test_assign_and_remove_teacher() {
    let storage = storage().await;
    let teacher = teacher(&storage, "a").await;
    let course = course(&storage, "Algebra").await;

    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    assert!(storage.is_teacher_assigned(course.id, teacher.id).await.unwrap());

    let teachers = storage.get_course_teachers(course.id).await.unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].id, teacher.id);

    let courses = storage.get_teacher_courses(teacher.id).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, course.id);

    // 重复指派
    let err = storage.assign_teacher(course.id, teacher.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));

    storage.remove_teacher(course.id, teacher.id).await.unwrap();
    assert!(!storage.is_teacher_assigned(course.id, teacher.id).await.unwrap());
    assert!(storage.get_teacher_courses(teacher.id).await.unwrap().is_empty());

    let err = storage.remove_teacher(course.id, teacher.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_edges_require_existing_endpoints() {
    let storage = storage().await;
    let teacher = teacher(&storage, "b").await;
    let student = student(&storage, "b").await;
    let course = course(&storage, "Geometry").await;

    let err = storage.assign_teacher(9999, teacher.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
    let err = storage.assign_teacher(course.id, 9999).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
    let err = storage.enroll_student(9999, student.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
    let err = storage.enroll_student(course.id, 9999).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
}

#[tokio::test]
async fn test_enrollment_is_symmetric() {
    let storage = storage().await;
    let alice = student(&storage, "alice").await;
    let bob = student(&storage, "bob").await;
    let algebra = course(&storage, "Algebra").await;
    let physics = course(&storage, "Physics").await;

    storage.enroll_student(algebra.id, alice.id).await.unwrap();
    storage.enroll_student(physics.id, alice.id).await.unwrap();
    storage.enroll_student(algebra.id, bob.id).await.unwrap();

    let students = storage.get_course_students(algebra.id).await.unwrap();
    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![alice.id, bob.id]);

    let courses = storage.get_student_courses(alice.id).await.unwrap();
    let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![algebra.id, physics.id]);

    let err = storage.enroll_student(algebra.id, bob.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));

    storage.unenroll_student(algebra.id, bob.id).await.unwrap();
    assert!(!storage.is_student_enrolled(algebra.id, bob.id).await.unwrap());
    assert!(storage.get_student_courses(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assignment_requires_assigned_teacher() {
    let storage = storage().await;
    let teacher = teacher(&storage, "c").await;
    let course = course(&storage, "Chemistry").await;

    let err = storage
        .create_assignment(teacher.id, assignment_request(course.id, None), date(2025, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    let assignment = assignment_for_all(&storage, teacher.id, course.id, None).await;
    assert_eq!(assignment.teacher_id, teacher.id);
    assert_eq!(assignment.course_id, course.id);
    assert!(assignment.for_all_students);
}

#[tokio::test]
async fn test_explicit_targets_must_be_enrolled() {
    let storage = storage().await;
    let teacher = teacher(&storage, "d").await;
    let enrolled = student(&storage, "enrolled").await;
    let outsider = student(&storage, "outsider").await;
    let course = course(&storage, "Biology").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    storage.enroll_student(course.id, enrolled.id).await.unwrap();

    let mut req = assignment_request(course.id, None);
    req.for_all_students = false;
    req.student_ids = vec![enrolled.id, outsider.id];
    let err = storage
        .create_assignment(teacher.id, req.clone(), date(2025, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    req.student_ids = vec![enrolled.id, enrolled.id];
    let assignment = storage
        .create_assignment(teacher.id, req, date(2025, 1, 1))
        .await
        .unwrap();
    assert_eq!(assignment.student_ids, vec![enrolled.id]);

    let err = storage
        .assign_student_to_assignment(assignment.id, outsider.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    let err = storage
        .assign_student_to_assignment(assignment.id, enrolled.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_unenroll_drops_explicit_targets() {
    let storage = storage().await;
    let teacher = teacher(&storage, "e").await;
    let student = student(&storage, "e").await;
    let course = course(&storage, "History").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    storage.enroll_student(course.id, student.id).await.unwrap();

    let mut req = assignment_request(course.id, None);
    req.for_all_students = false;
    req.student_ids = vec![student.id];
    let assignment = storage
        .create_assignment(teacher.id, req, date(2025, 1, 1))
        .await
        .unwrap();

    storage.unenroll_student(course.id, student.id).await.unwrap();

    let reloaded = storage.get_assignment(assignment.id).await.unwrap().unwrap();
    assert!(reloaded.student_ids.is_empty());

    let err = storage
        .create_submission(
            student.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                comments: None,
            },
            at_noon(2025, 1, 2),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));
}

#[tokio::test]
async fn test_list_course_assignments() {
    let storage = storage().await;
    let teacher = teacher(&storage, "f").await;
    let course = course(&storage, "Music").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();

    assignment_for_all(&storage, teacher.id, course.id, None).await;
    assignment_for_all(&storage, teacher.id, course.id, Some(date(2025, 2, 1))).await;

    let assignments = storage.list_course_assignments(course.id).await.unwrap();
    assert_eq!(assignments.len(), 2);
    assert!(assignments.iter().all(|a| a.course_id == course.id));

    let err = storage.list_course_assignments(9999).await.unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
}

#[tokio::test]
async fn test_due_date_can_be_cleared() {
    let storage = storage().await;
    let teacher = teacher(&storage, "h").await;
    let course = course(&storage, "History").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    let assignment =
        assignment_for_all(&storage, teacher.id, course.id, Some(date(2025, 2, 1))).await;

    let updated = storage
        .update_assignment(
            assignment.id,
            UpdateAssignmentRequest {
                clear_due_date: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.due_date, None);

    let stored = storage.get_assignment(assignment.id).await.unwrap().unwrap();
    assert_eq!(stored.due_date, None);
    assert_eq!(stored.name, assignment.name);
}

#[tokio::test]
async fn test_teacher_with_assignments_cannot_be_deleted() {
    let storage = storage().await;
    let teacher = teacher(&storage, "g").await;
    let course = course(&storage, "Art").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    let assignment = assignment_for_all(&storage, teacher.id, course.id, None).await;

    let err = storage.delete_teacher(teacher.id).await.unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));

    storage.delete_assignment(assignment.id).await.unwrap();
    storage.delete_teacher(teacher.id).await.unwrap();
    assert!(storage.get_teacher(teacher.id).await.unwrap().is_none());
}

fn account_request(username: &str, role: AccountRole) -> CreateAccountRequest {
    CreateAccountRequest {
        username: username.to_string(),
        password: "correct-horse".to_string(),
        name: "Grace".to_string(),
        surname: "Hopper".to_string(),
        role,
        teacher_id: None,
        student_id: None,
    }
}

#[tokio::test]
async fn test_course_roster_visible_to_members() {
    let storage = storage().await;
    let course = course(&storage, "Physics").await;
    let lecturer = teacher(&storage, "i").await;
    let outsider_teacher = teacher(&storage, "j").await;
    let enrolled = student(&storage, "i").await;
    let outsider = student(&storage, "j").await;
    storage.assign_teacher(course.id, lecturer.id).await.unwrap();
    storage.enroll_student(course.id, enrolled.id).await.unwrap();

    let mut accounts = Vec::new();
    for (username, teacher_id, student_id) in [
        ("lecturer", Some(lecturer.id), None),
        ("visitor", Some(outsider_teacher.id), None),
        ("enrolled", None, Some(enrolled.id)),
        ("outsider", None, Some(outsider.id)),
    ] {
        let role = if teacher_id.is_some() {
            AccountRole::Teacher
        } else {
            AccountRole::Student
        };
        let account = create_account(
            &storage,
            CreateAccountRequest {
                teacher_id,
                student_id,
                ..account_request(username, role)
            },
            &fast_argon2(),
        )
        .await
        .unwrap();
        accounts.push(account);
    }
    let admin = create_account(
        &storage,
        account_request("root", AccountRole::Admin),
        &fast_argon2(),
    )
    .await
    .unwrap();

    for member in [&admin, &accounts[0], &accounts[2]] {
        assert!(ensure_course_member(&storage, member, course.id).await.is_ok());
    }
    for stranger in [&accounts[1], &accounts[3]] {
        let err = ensure_course_member(&storage, stranger, course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::Authorization(_)));
    }

    // 学生成员可以看到任课教师名单
    let teachers = storage.get_course_teachers(course.id).await.unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].id, lecturer.id);
}
