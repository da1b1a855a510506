#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use rust_academy_next::config::{Argon2Config, DatabaseConfig};
use rust_academy_next::models::Attachment;
use rust_academy_next::models::assignments::entities::Assignment;
use rust_academy_next::models::assignments::requests::CreateAssignmentRequest;
use rust_academy_next::models::courses::entities::{Course, CourseLevel};
use rust_academy_next::models::courses::requests::CreateCourseRequest;
use rust_academy_next::models::students::entities::Student;
use rust_academy_next::models::students::requests::CreateStudentRequest;
use rust_academy_next::models::teachers::entities::Teacher;
use rust_academy_next::models::teachers::requests::CreateTeacherRequest;
use rust_academy_next::storage::Storage;
use rust_academy_next::storage::sea_orm_storage::SeaOrmStorage;

pub async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .expect("in-memory database")
}

/// 测试用低成本参数
pub fn fast_argon2() -> Argon2Config {
    Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub async fn teacher(storage: &dyn Storage, tag: &str) -> Teacher {
    storage
        .create_teacher(CreateTeacherRequest {
            first_name: format!("Teacher{tag}"),
            last_name: "Smith".to_string(),
            email: format!("teacher.{tag}@example.com"),
            phone: None,
            specialty: Some("Mathematics".to_string()),
        })
        .await
        .unwrap()
}

pub async fn student(storage: &dyn Storage, tag: &str) -> Student {
    storage
        .create_student(CreateStudentRequest {
            first_name: format!("Student{tag}"),
            last_name: "Jones".to_string(),
            email: format!("student.{tag}@example.com"),
            phone: None,
        })
        .await
        .unwrap()
}

pub async fn course(storage: &dyn Storage, name: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: name.to_string(),
            description: None,
            level: CourseLevel::Basic,
            price: 0.0,
        })
        .await
        .unwrap()
}

pub fn assignment_request(course_id: i64, due: Option<NaiveDate>) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        course_id,
        name: "Homework 1".to_string(),
        description: Some("Chapter 1 exercises".to_string()),
        publish_date: Some(date(2025, 1, 1)),
        due_date: due,
        for_all_students: true,
        student_ids: Vec::new(),
    }
}

pub async fn assignment_for_all(
    storage: &dyn Storage,
    teacher_id: i64,
    course_id: i64,
    due: Option<NaiveDate>,
) -> Assignment {
    storage
        .create_assignment(
            teacher_id,
            assignment_request(course_id, due),
            date(2025, 1, 1),
        )
        .await
        .unwrap()
}

pub fn attachment(name: &str) -> Attachment {
    Attachment {
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        data: b"%PDF-1.4 test".to_vec(),
    }
}
