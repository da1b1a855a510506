pub mod accounts;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod students;
pub mod submissions;
pub mod teachers;

pub use accounts::configure_account_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use students::configure_student_routes;
pub use submissions::configure_submission_routes;
pub use teachers::configure_teacher_routes;
