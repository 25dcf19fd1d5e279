use std::sync::Arc;

use tracing::{info, warn};

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{Enrollment, EnrollmentFlag};

/// Attendance and payment flags of existing enrollments.
pub struct AttendanceService {
    gateway: Arc<dyn Gateway>,
}

impl AttendanceService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn set_attendance(
        &self,
        student_id: &str,
        course_id: &str,
        attended: bool,
    ) -> Result<(), AppError> {
        self.apply(student_id, course_id, EnrollmentFlag::Attendance(attended))
            .await
    }

    pub async fn set_payment(
        &self,
        student_id: &str,
        course_id: &str,
        paid: bool,
    ) -> Result<(), AppError> {
        self.apply(student_id, course_id, EnrollmentFlag::Paid(paid))
            .await
    }

    pub async fn get_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, AppError> {
        self.gateway
            .find_enrollment(student_id, course_id)
            .await?
            .ok_or(AppError::NotFound("enrollment"))
    }

    // Setting a flag to its current value still matches the row, so repeats succeed.
    async fn apply(
        &self,
        student_id: &str,
        course_id: &str,
        flag: EnrollmentFlag,
    ) -> Result<(), AppError> {
        let updated = self
            .gateway
            .update_enrollment_flag(student_id, course_id, flag)
            .await
            .map_err(AppError::write)?;

        if !updated {
            warn!(
                "no enrollment for student {} in course {}, {:?} not applied",
                student_id, course_id, flag
            );
            return Err(AppError::NotFound("enrollment"));
        }

        info!(
            "student {} in course {} set {:?}",
            student_id, course_id, flag
        );
        Ok(())
    }
}
