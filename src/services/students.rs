use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{Enrollment, NewStudent, Student};

pub struct StudentService {
    gateway: Arc<dyn Gateway>,
}

impl StudentService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn create_student(&self, req: NewStudent) -> Result<Student, AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::InvalidInput("student name must not be empty".to_string()));
        }

        let student = Student {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            phone: req.phone,
            company_name: req.company_name,
            email: req.email,
        };
        self.gateway
            .insert_student(&student)
            .await
            .map_err(AppError::write)?;
        Ok(student)
    }

    pub async fn enroll(&self, student_id: &str, course_id: &str) -> Result<Enrollment, AppError> {
        if self.gateway.find_student(student_id).await?.is_none() {
            return Err(AppError::NotFound("student"));
        }
        if self.gateway.find_course(course_id).await?.is_none() {
            return Err(AppError::NotFound("course"));
        }

        let enrollment = Enrollment {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            attendance: false,
            paid: false,
            enrolled_at: Utc::now(),
        };
        match self.gateway.insert_enrollment(&enrollment).await {
            Ok(()) => {
                info!("student {} enrolled in course {}", student_id, course_id);
                Ok(enrollment)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("student {} is already enrolled in course {}", student_id, course_id),
            )),
            Err(e) => Err(AppError::write(e)),
        }
    }

    /// Every student, in creation order. Feeds the spreadsheet export.
    pub async fn all_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.gateway.all_students().await?)
    }
}
