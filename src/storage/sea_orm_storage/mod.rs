//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 所有会修改数据的业务操作都在单个事务内完成。

mod accounts;
mod assignments;
mod courses;
mod enrollments;
mod students;
mod submissions;
mod teachers;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AcademyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 数据库错误映射：约束冲突转为 Conflict，其余为数据库操作错误
pub(crate) fn db_err(context: &'static str) -> impl Fn(DbErr) -> AcademyError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            AcademyError::conflict(format!("{context}: duplicate value ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            AcademyError::conflict(format!("{context}: still referenced ({detail})"))
        }
        _ => AcademyError::database_operation(format!("{context}: {e}")),
    }
}

/// 当前秒级时间戳
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + 外键约束）
    ///
    /// 内存数据库只在单个连接内可见，连接池固定为 1 且不回收。
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = Self::is_sqlite_memory(url);

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    fn is_sqlite_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" || url == "sqlite::memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::{AccountCredentials, Storage};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        self.create_account_impl(account).await
    }

    async fn create_student_with_account(
        &self,
        student: CreateStudentRequest,
        credentials: AccountCredentials,
    ) -> Result<(Student, Account)> {
        self.create_student_with_account_impl(student, credentials)
            .await
    }

    async fn create_teacher_with_account(
        &self,
        teacher: CreateTeacherRequest,
        credentials: AccountCredentials,
    ) -> Result<(Teacher, Account)> {
        self.create_teacher_with_account_impl(teacher, credentials)
            .await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.get_account_by_username_impl(username).await
    }

    async fn list_accounts(&self, query: AccountListQuery) -> Result<PaginatedResponse<Account>> {
        self.list_accounts_impl(query).await
    }

    async fn update_account(&self, id: i64, changes: AccountChanges) -> Result<Account> {
        self.update_account_impl(id, changes).await
    }

    async fn delete_account(&self, id: i64) -> Result<()> {
        self.delete_account_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<()> {
        self.update_last_login_impl(id).await
    }

    async fn count_accounts(&self) -> Result<u64> {
        self.count_accounts_impl().await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_impl(id).await
    }

    async fn list_teachers(&self, query: TeacherListQuery) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_impl(query).await
    }

    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest) -> Result<Teacher> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<()> {
        self.delete_teacher_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<PaginatedResponse<Student>> {
        self.list_students_impl(query).await
    }

    async fn update_student(&self, id: i64, update: UpdateStudentRequest) -> Result<Student> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.delete_student_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_impl(id).await
    }

    async fn list_courses(&self, query: CourseListQuery) -> Result<PaginatedResponse<Course>> {
        self.list_courses_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Course> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<()> {
        self.delete_course_impl(id).await
    }

    // 课程关系
    async fn assign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<()> {
        self.assign_teacher_impl(course_id, teacher_id).await
    }

    async fn remove_teacher(&self, course_id: i64, teacher_id: i64) -> Result<()> {
        self.remove_teacher_impl(course_id, teacher_id).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<()> {
        self.unenroll_student_impl(course_id, student_id).await
    }

    async fn get_course_teachers(&self, course_id: i64) -> Result<Vec<Teacher>> {
        self.get_course_teachers_impl(course_id).await
    }

    async fn get_course_students(&self, course_id: i64) -> Result<Vec<Student>> {
        self.get_course_students_impl(course_id).await
    }

    async fn get_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.get_teacher_courses_impl(teacher_id).await
    }

    async fn get_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.get_student_courses_impl(student_id).await
    }

    async fn is_teacher_assigned(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        self.is_teacher_assigned_impl(course_id, teacher_id).await
    }

    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(course_id, student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
        today: NaiveDate,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, assignment, today)
            .await
    }

    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(id).await
    }

    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_course_assignments_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<()> {
        self.delete_assignment_impl(id).await
    }

    async fn assign_student_to_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<()> {
        self.assign_student_to_assignment_impl(assignment_id, student_id)
            .await
    }

    async fn remove_student_from_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<()> {
        self.remove_student_from_assignment_impl(assignment_id, student_id)
            .await
    }

    async fn set_assignment_attachment(
        &self,
        id: i64,
        attachment: Attachment,
    ) -> Result<Assignment> {
        self.set_assignment_attachment_impl(id, attachment).await
    }

    async fn get_assignment_attachment(&self, id: i64) -> Result<Option<Attachment>> {
        self.get_assignment_attachment_impl(id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, submission, now)
            .await
    }

    async fn upload_submission_attachment(
        &self,
        submission_id: i64,
        student_id: i64,
        attachment: Attachment,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        self.upload_submission_attachment_impl(submission_id, student_id, attachment, now)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: GradeSubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        self.grade_submission_impl(submission_id, teacher_id, grade, now)
            .await
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_impl(id).await
    }

    async fn get_submission_attachment(&self, id: i64) -> Result<Option<Attachment>> {
        self.get_submission_attachment_impl(id).await
    }

    async fn list_submissions(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>> {
        self.list_submissions_impl(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("academy.db").unwrap(),
            "sqlite://academy.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/academy").unwrap(),
            "postgres://u:p@localhost/academy"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[test]
    fn test_is_sqlite_memory() {
        assert!(SeaOrmStorage::is_sqlite_memory("sqlite::memory:"));
        assert!(!SeaOrmStorage::is_sqlite_memory("sqlite://academy.db?mode=rwc"));
    }
}
