use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    Attachment, PaginatedResponse,
    accounts::{
        entities::Account,
        requests::{AccountChanges, AccountListQuery, NewAccount},
    },
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 账号创建时附带的凭据（密码已哈希）
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub surname: Option<String>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号（关联已存在的档案）
    async fn create_account(&self, account: NewAccount) -> Result<Account>;
    // 同时创建学生档案与学生账号
    async fn create_student_with_account(
        &self,
        student: CreateStudentRequest,
        credentials: AccountCredentials,
    ) -> Result<(Student, Account)>;
    // 同时创建教师档案与教师账号
    async fn create_teacher_with_account(
        &self,
        teacher: CreateTeacherRequest,
        credentials: AccountCredentials,
    ) -> Result<(Teacher, Account)>;
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn list_accounts(&self, query: AccountListQuery) -> Result<PaginatedResponse<Account>>;
    async fn update_account(&self, id: i64, changes: AccountChanges) -> Result<Account>;
    async fn delete_account(&self, id: i64) -> Result<()>;
    async fn update_last_login(&self, id: i64) -> Result<()>;
    async fn count_accounts(&self) -> Result<u64>;

    /// 教师档案
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, query: TeacherListQuery) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest) -> Result<Teacher>;
    // 删除教师档案及其关联账号
    async fn delete_teacher(&self, id: i64) -> Result<()>;

    /// 学生档案
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest) -> Result<Student>;
    // 删除学生档案及其关联账号
    async fn delete_student(&self, id: i64) -> Result<()>;

    /// 课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self, query: CourseListQuery) -> Result<PaginatedResponse<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Course>;
    async fn delete_course(&self, id: i64) -> Result<()>;

    /// 课程关系（课程-教师、课程-学生边集）
    async fn assign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<()>;
    async fn remove_teacher(&self, course_id: i64, teacher_id: i64) -> Result<()>;
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()>;
    // 同时移除该学生在本课程作业上的显式指派
    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<()>;
    async fn get_course_teachers(&self, course_id: i64) -> Result<Vec<Teacher>>;
    async fn get_course_students(&self, course_id: i64) -> Result<Vec<Student>>;
    async fn get_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    async fn get_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    async fn is_teacher_assigned(&self, course_id: i64, teacher_id: i64) -> Result<bool>;
    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;

    /// 作业
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
        today: NaiveDate,
    ) -> Result<Assignment>;
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn delete_assignment(&self, id: i64) -> Result<()>;
    async fn assign_student_to_assignment(&self, assignment_id: i64, student_id: i64)
    -> Result<()>;
    async fn remove_student_from_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<()>;
    async fn set_assignment_attachment(
        &self,
        id: i64,
        attachment: Attachment,
    ) -> Result<Assignment>;
    async fn get_assignment_attachment(&self, id: i64) -> Result<Option<Attachment>>;

    /// 提交生命周期
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission>;
    async fn upload_submission_attachment(
        &self,
        submission_id: i64,
        student_id: i64,
        attachment: Attachment,
        now: DateTime<Utc>,
    ) -> Result<Submission>;
    async fn grade_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: GradeSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission>;
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_submission_attachment(&self, id: i64) -> Result<Option<Attachment>>;
    async fn list_submissions(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
