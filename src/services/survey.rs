use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{CourseField, Evaluation, NewEvaluation};

/// Course-level survey reports and the per-student evaluations behind them.
///
/// A report belongs to the course row and is replaced wholesale. Evaluations
/// are separate records and fail independently of the report.
pub struct SurveyService {
    gateway: Arc<dyn Gateway>,
}

impl SurveyService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Returns the captured report, or an empty string if none was written yet.
    pub async fn get_report(&self, course_id: &str) -> Result<String, AppError> {
        let course = self
            .gateway
            .find_course(course_id)
            .await?
            .ok_or(AppError::NotFound("course"))?;
        Ok(course.report.unwrap_or_default())
    }

    pub async fn set_report(&self, course_id: &str, report: String) -> Result<(), AppError> {
        let len = report.len();
        let updated = self
            .gateway
            .update_course_field(course_id, &CourseField::Report(report))
            .await
            .map_err(AppError::write)?;

        if !updated {
            return Err(AppError::NotFound("course"));
        }
        info!("report for course {} replaced ({} bytes)", course_id, len);
        Ok(())
    }

    pub async fn list_evaluations(&self, course_id: &str) -> Result<Vec<Evaluation>, AppError> {
        if self.gateway.find_course(course_id).await?.is_none() {
            return Err(AppError::NotFound("course"));
        }
        Ok(self.gateway.evaluations_for_course(course_id).await?)
    }

    pub async fn submit_evaluation(&self, req: NewEvaluation) -> Result<Evaluation, AppError> {
        if !(1..=5).contains(&req.rating) {
            return Err(AppError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                req.rating
            )));
        }
        if self.gateway.find_course(&req.course_id).await?.is_none() {
            return Err(AppError::NotFound("course"));
        }
        if self.gateway.find_student(&req.student_id).await?.is_none() {
            return Err(AppError::NotFound("student"));
        }

        let evaluation = Evaluation {
            id: Uuid::new_v4().to_string(),
            course_id: req.course_id,
            student_id: req.student_id,
            rating: req.rating,
            content: req.content,
            created_at: Utc::now(),
        };
        self.gateway
            .insert_evaluation(&evaluation)
            .await
            .map_err(AppError::write)?;
        Ok(evaluation)
    }

    pub async fn delete_evaluation(&self, evaluation_id: &str) -> Result<(), AppError> {
        let deleted = self
            .gateway
            .delete_evaluation(evaluation_id)
            .await
            .map_err(AppError::write)?;

        if !deleted {
            warn!("evaluation {} does not exist", evaluation_id);
            return Err(AppError::NotFound("evaluation"));
        }
        info!("evaluation {} deleted", evaluation_id);
        Ok(())
    }
}
