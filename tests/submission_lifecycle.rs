mod common;

use common::*;
use rust_academy_next::errors::AcademyError;
use rust_academy_next::models::submissions::entities::SubmissionStatus;
use rust_academy_next::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery,
};
use rust_academy_next::models::teachers::entities::Teacher;
use rust_academy_next::models::{assignments::entities::Assignment, students::entities::Student};
use rust_academy_next::storage::Storage;
use rust_academy_next::storage::sea_orm_storage::SeaOrmStorage;

struct Fixture {
    storage: SeaOrmStorage,
    teacher: Teacher,
    student: Student,
    assignment: Assignment,
}

/// 一名任课教师、一名选课学生、一份截止于 2025-01-10 的作业
async fn fixture() -> Fixture {
    let storage = storage().await;
    let teacher = teacher(&storage, "owner").await;
    let student = student(&storage, "s1").await;
    let course = course(&storage, "Linear Algebra").await;
    storage.assign_teacher(course.id, teacher.id).await.unwrap();
    storage.enroll_student(course.id, student.id).await.unwrap();
    let assignment =
        assignment_for_all(&storage, teacher.id, course.id, Some(date(2025, 1, 10))).await;

    Fixture {
        storage,
        teacher,
        student,
        assignment,
    }
}

fn submit(assignment_id: i64) -> CreateSubmissionRequest {
    CreateSubmissionRequest {
        assignment_id,
        comments: Some("Done".to_string()),
    }
}

fn grade(score: f64) -> GradeSubmissionRequest {
    GradeSubmissionRequest {
        score,
        comments: Some("Well done".to_string()),
    }
}

#[tokio::test]
async fn test_submission_on_due_date_is_on_time() {
    let f = fixture().await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 10))
        .await
        .unwrap();

    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert_eq!(submission.student_id, f.student.id);
    assert!(submission.score.is_none());
}

#[tokio::test]
async fn test_late_submission_graded() {
    let f = fixture().await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 11))
        .await
        .unwrap();
    assert_eq!(submission.status, SubmissionStatus::Late);

    // 无附件不能评分
    let err = f
        .storage
        .grade_submission(submission.id, f.teacher.id, grade(7.5), at_noon(2025, 1, 12))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    let uploaded = f
        .storage
        .upload_submission_attachment(
            submission.id,
            f.student.id,
            attachment("answer.pdf"),
            at_noon(2025, 1, 11),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.status, SubmissionStatus::Late);
    assert!(uploaded.has_attachment());

    let graded = f
        .storage
        .grade_submission(submission.id, f.teacher.id, grade(7.5), at_noon(2025, 1, 12))
        .await
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.score, Some(7.5));
    assert_eq!(graded.comments.as_deref(), Some("Well done"));
    assert!(graded.graded_at.is_some());

    let stored = f
        .storage
        .get_submission_attachment(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.file_name, "answer.pdf");
    assert_eq!(stored.data, b"%PDF-1.4 test".to_vec());
}

#[tokio::test]
async fn test_score_must_be_in_range() {
    let f = fixture().await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();
    f.storage
        .upload_submission_attachment(
            submission.id,
            f.student.id,
            attachment("answer.pdf"),
            at_noon(2025, 1, 5),
        )
        .await
        .unwrap();

    for score in [-0.5, 10.5, f64::NAN] {
        let err = f
            .storage
            .grade_submission(submission.id, f.teacher.id, grade(score), at_noon(2025, 1, 6))
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::Validation(_)));
    }

    for score in [0.0, 10.0] {
        let graded = f
            .storage
            .grade_submission(submission.id, f.teacher.id, grade(score), at_noon(2025, 1, 6))
            .await
            .unwrap();
        assert_eq!(graded.score, Some(score));
    }
}

#[tokio::test]
async fn test_only_assignment_owner_grades() {
    let f = fixture().await;
    let other = teacher(&f.storage, "other").await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();
    f.storage
        .upload_submission_attachment(
            submission.id,
            f.student.id,
            attachment("answer.pdf"),
            at_noon(2025, 1, 5),
        )
        .await
        .unwrap();

    let err = f
        .storage
        .grade_submission(submission.id, other.id, grade(8.0), at_noon(2025, 1, 6))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));
}

#[tokio::test]
async fn test_duplicate_submission_conflicts() {
    let f = fixture().await;
    f.storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();

    let err = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 6))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_reupload_resets_grade() {
    let f = fixture().await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();
    f.storage
        .upload_submission_attachment(
            submission.id,
            f.student.id,
            attachment("v1.pdf"),
            at_noon(2025, 1, 5),
        )
        .await
        .unwrap();
    f.storage
        .grade_submission(submission.id, f.teacher.id, grade(6.0), at_noon(2025, 1, 6))
        .await
        .unwrap();

    let reuploaded = f
        .storage
        .upload_submission_attachment(
            submission.id,
            f.student.id,
            attachment("v2.pdf"),
            at_noon(2025, 1, 12),
        )
        .await
        .unwrap();
    assert_eq!(reuploaded.status, SubmissionStatus::Late);
    assert!(reuploaded.score.is_none());
    assert!(reuploaded.graded_at.is_none());
}

#[tokio::test]
async fn test_upload_checks_owner_and_content() {
    let f = fixture().await;
    let intruder = student(&f.storage, "intruder").await;
    let submission = f
        .storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();

    let err = f
        .storage
        .upload_submission_attachment(
            submission.id,
            intruder.id,
            attachment("x.pdf"),
            at_noon(2025, 1, 5),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    let mut empty = attachment("empty.pdf");
    empty.data.clear();
    let err = f
        .storage
        .upload_submission_attachment(submission.id, f.student.id, empty, at_noon(2025, 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    let err = f
        .storage
        .upload_submission_attachment(9999, f.student.id, attachment("x.pdf"), at_noon(2025, 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
}

#[tokio::test]
async fn test_unenrolled_student_cannot_submit() {
    let f = fixture().await;
    let outsider = student(&f.storage, "outsider").await;

    let err = f
        .storage
        .create_submission(outsider.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    let err = f
        .storage
        .create_submission(f.student.id, submit(9999), at_noon(2025, 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_student_cannot_submit() {
    let f = fixture().await;

    let err = f
        .storage
        .create_submission(9999, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::NotFound(_)));

    let submissions = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(submissions.items.is_empty());
}

#[tokio::test]
async fn test_list_submissions_filters() {
    let f = fixture().await;
    let other_teacher = teacher(&f.storage, "t2").await;
    let second = student(&f.storage, "s2").await;
    f.storage
        .enroll_student(f.assignment.course_id, second.id)
        .await
        .unwrap();

    f.storage
        .create_submission(f.student.id, submit(f.assignment.id), at_noon(2025, 1, 5))
        .await
        .unwrap();
    f.storage
        .create_submission(second.id, submit(f.assignment.id), at_noon(2025, 1, 15))
        .await
        .unwrap();

    let all = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            assignment_id: Some(f.assignment.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.items.len(), 2);
    // 最新提交在前
    assert_eq!(all.items[0].student_id, second.id);

    let late = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            status: Some(SubmissionStatus::Late),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(late.items.len(), 1);
    assert_eq!(late.items[0].student_id, second.id);

    let mine = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            student_id: Some(f.student.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.items.len(), 1);

    let owned = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            teacher_id: Some(f.teacher.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(owned.items.len(), 2);

    let foreign = f
        .storage
        .list_submissions(SubmissionListQuery {
            page: 1,
            size: 20,
            teacher_id: Some(other_teacher.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(foreign.items.is_empty());
}
