pub mod repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::models::{
    Course, CourseField, CourseFilter, Enrollment, EnrollmentFlag, Evaluation, NewCourse, Page,
    RosterEntry, RosterFilter, Student,
};

pub use repository::SqliteGateway;

/// Keyed storage access for courses, students, enrollments and evaluations.
///
/// Lookups report a missing record as `Ok(None)`; updates and deletes report it
/// as `Ok(false)`. Every write is a single statement.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn find_course(&self, id: &str) -> Result<Option<Course>, sqlx::Error>;
    async fn list_courses(
        &self,
        filter: &CourseFilter,
        page: Page,
    ) -> Result<Vec<Course>, sqlx::Error>;
    async fn count_courses(&self, filter: &CourseFilter) -> Result<i64, sqlx::Error>;
    async fn insert_course(&self, course: &Course) -> Result<(), sqlx::Error>;
    async fn update_course(&self, id: &str, course: &NewCourse) -> Result<bool, sqlx::Error>;
    async fn update_course_field(&self, id: &str, field: &CourseField)
    -> Result<bool, sqlx::Error>;
    async fn delete_course(&self, id: &str) -> Result<bool, sqlx::Error>;
    async fn started_courses(&self, now: DateTime<Utc>) -> Result<Vec<Course>, sqlx::Error>;
    async fn started_revenue_total(&self, now: DateTime<Utc>) -> Result<f64, sqlx::Error>;
    async fn count_courses_for_executor(&self, executor_id: &str) -> Result<i64, sqlx::Error>;
    async fn courses_for_instructor(&self, instructor_id: &str)
    -> Result<Vec<Course>, sqlx::Error>;

    async fn insert_student(&self, student: &Student) -> Result<(), sqlx::Error>;
    async fn find_student(&self, id: &str) -> Result<Option<Student>, sqlx::Error>;
    async fn all_students(&self) -> Result<Vec<Student>, sqlx::Error>;

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), sqlx::Error>;
    async fn find_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error>;
    async fn roster(
        &self,
        course_id: &str,
        filter: &RosterFilter,
    ) -> Result<Vec<RosterEntry>, sqlx::Error>;
    async fn update_enrollment_flag(
        &self,
        student_id: &str,
        course_id: &str,
        flag: EnrollmentFlag,
    ) -> Result<bool, sqlx::Error>;

    async fn insert_evaluation(&self, evaluation: &Evaluation) -> Result<(), sqlx::Error>;
    async fn evaluations_for_course(&self, course_id: &str)
    -> Result<Vec<Evaluation>, sqlx::Error>;
    async fn delete_evaluation(&self, id: &str) -> Result<bool, sqlx::Error>;
}

/// Opens a pool and brings the schema up to date.
pub async fn open_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
