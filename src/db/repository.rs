use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::Gateway;
use crate::models::{
    Course, CourseField, CourseFilter, Enrollment, EnrollmentFlag, Evaluation, NewCourse, Page,
    RosterEntry, RosterFilter, Student,
};

const COURSE_COLUMNS: &str = "id, name, company_name, description, start_date, end_date, \
     location, course_fee, instructor_id, executor_id, revenue, report";

#[derive(Clone)]
pub struct SqliteGateway {
    db: SqlitePool,
}

impl SqliteGateway {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Gateway for SqliteGateway {
    async fn find_course(&self, id: &str) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn list_courses(
        &self,
        filter: &CourseFilter,
        page: Page,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE (?1 IS NULL OR instr(lower(name), lower(?1)) > 0)
              AND (?2 IS NULL OR instr(lower(company_name), lower(?2)) > 0)
              AND (?3 IS NULL OR instr(lower(location), lower(?3)) > 0)
            ORDER BY julianday(start_date) DESC, id
            LIMIT ?4 OFFSET ?5
            "#
        ))
        .bind(&filter.name)
        .bind(&filter.company_name)
        .bind(&filter.location)
        .bind(i64::from(page.page_size))
        .bind(i64::from(page.offset))
        .fetch_all(&self.db)
        .await
    }

    async fn count_courses(&self, filter: &CourseFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM courses
            WHERE (?1 IS NULL OR instr(lower(name), lower(?1)) > 0)
              AND (?2 IS NULL OR instr(lower(company_name), lower(?2)) > 0)
              AND (?3 IS NULL OR instr(lower(location), lower(?3)) > 0)
            "#,
        )
        .bind(&filter.name)
        .bind(&filter.company_name)
        .bind(&filter.location)
        .fetch_one(&self.db)
        .await
    }

    async fn insert_course(&self, course: &Course) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO courses
                (id, name, company_name, description, start_date, end_date, location,
                course_fee, instructor_id, executor_id, revenue, report)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&course.id)
        .bind(&course.name)
        .bind(&course.company_name)
        .bind(&course.description)
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(&course.location)
        .bind(course.course_fee)
        .bind(&course.instructor_id)
        .bind(&course.executor_id)
        .bind(course.revenue)
        .bind(&course.report)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn update_course(&self, id: &str, course: &NewCourse) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET name = ?1,
                company_name = ?2,
                description = ?3,
                start_date = ?4,
                end_date = ?5,
                location = ?6,
                course_fee = ?7,
                instructor_id = ?8,
                executor_id = ?9
            WHERE id = ?10
            "#,
        )
        .bind(&course.name)
        .bind(&course.company_name)
        .bind(&course.description)
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(&course.location)
        .bind(course.course_fee)
        .bind(&course.instructor_id)
        .bind(&course.executor_id)
        .bind(id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn update_course_field(
        &self,
        id: &str,
        field: &CourseField,
    ) -> Result<bool, sqlx::Error> {
        let query = match field {
            CourseField::Revenue(revenue) => {
                sqlx::query("UPDATE courses SET revenue = ?1 WHERE id = ?2").bind(*revenue)
            }
            CourseField::Report(report) => {
                sqlx::query("UPDATE courses SET report = ?1 WHERE id = ?2").bind(report.clone())
            }
        };

        let result = query.bind(id).execute(&self.db).await?.rows_affected();
        Ok(result > 0)
    }

    async fn delete_course(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn started_courses(&self, now: DateTime<Utc>) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE julianday(start_date) < julianday(?1)
            ORDER BY julianday(start_date) DESC, id
            "#
        ))
        .bind(now)
        .fetch_all(&self.db)
        .await
    }

    async fn started_revenue_total(&self, now: DateTime<Utc>) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(revenue), 0.0)
            FROM courses
            WHERE julianday(start_date) < julianday(?1)
            "#,
        )
        .bind(now)
        .fetch_one(&self.db)
        .await
    }

    async fn count_courses_for_executor(&self, executor_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE executor_id = ?")
            .bind(executor_id)
            .fetch_one(&self.db)
            .await
    }

    async fn courses_for_instructor(
        &self,
        instructor_id: &str,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE instructor_id = ? \
             ORDER BY julianday(start_date), id"
        ))
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await
    }

    async fn insert_student(&self, student: &Student) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO students (id, name, phone, company_name, email)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(&student.phone)
        .bind(&student.company_name)
        .bind(&student.email)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, phone, company_name, email FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn all_students(&self) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, phone, company_name, email FROM students ORDER BY rowid",
        )
        .fetch_all(&self.db)
        .await
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (student_id, course_id, attendance, paid, enrolled_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&enrollment.student_id)
        .bind(&enrollment.course_id)
        .bind(enrollment.attendance)
        .bind(enrollment.paid)
        .bind(enrollment.enrolled_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn find_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT student_id, course_id, attendance, paid, enrolled_at
            FROM enrollments
            WHERE student_id = ?1 AND course_id = ?2
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.db)
        .await
    }

    async fn roster(
        &self,
        course_id: &str,
        filter: &RosterFilter,
    ) -> Result<Vec<RosterEntry>, sqlx::Error> {
        sqlx::query_as::<_, RosterEntry>(
            r#"
            SELECT
                e.student_id, e.course_id, s.name, s.phone, s.company_name, s.email,
                e.attendance, e.paid
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE e.course_id = ?1
              AND (?2 IS NULL OR instr(lower(s.name), lower(?2)) > 0)
              AND (?3 IS NULL OR s.phone = ?3)
              AND (?4 IS NULL OR instr(lower(s.company_name), lower(?4)) > 0)
            ORDER BY e.rowid
            "#,
        )
        .bind(course_id)
        .bind(&filter.name)
        .bind(&filter.phone)
        .bind(&filter.company_name)
        .fetch_all(&self.db)
        .await
    }

    async fn update_enrollment_flag(
        &self,
        student_id: &str,
        course_id: &str,
        flag: EnrollmentFlag,
    ) -> Result<bool, sqlx::Error> {
        let query = match flag {
            EnrollmentFlag::Attendance(attended) => sqlx::query(
                "UPDATE enrollments SET attendance = ?1 WHERE student_id = ?2 AND course_id = ?3",
            )
            .bind(attended),
            EnrollmentFlag::Paid(paid) => sqlx::query(
                "UPDATE enrollments SET paid = ?1 WHERE student_id = ?2 AND course_id = ?3",
            )
            .bind(paid),
        };

        let result = query
            .bind(student_id)
            .bind(course_id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn insert_evaluation(&self, evaluation: &Evaluation) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO evaluations (id, course_id, student_id, rating, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&evaluation.id)
        .bind(&evaluation.course_id)
        .bind(&evaluation.student_id)
        .bind(evaluation.rating)
        .bind(&evaluation.content)
        .bind(evaluation.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn evaluations_for_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<Evaluation>, sqlx::Error> {
        sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT id, course_id, student_id, rating, content, created_at
            FROM evaluations
            WHERE course_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.db)
        .await
    }

    async fn delete_evaluation(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM evaluations WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }
}
