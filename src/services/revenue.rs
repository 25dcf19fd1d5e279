use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{Course, CourseField, CourseFilter};

/// Staff-entered course revenue and the aggregates managers read.
///
/// Revenue is never derived from fee or attendance here; it is whatever staff
/// last recorded.
pub struct RevenueService {
    gateway: Arc<dyn Gateway>,
}

impl RevenueService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// The stored revenue, `None` until staff record one.
    pub async fn get_course_revenue(&self, course_id: &str) -> Result<Option<f64>, AppError> {
        let course = self
            .gateway
            .find_course(course_id)
            .await?
            .ok_or(AppError::NotFound("course"))?;
        Ok(course.revenue)
    }

    pub async fn set_course_revenue(&self, course_id: &str, revenue: f64) -> Result<(), AppError> {
        if !revenue.is_finite() || revenue < 0.0 {
            warn!("rejected revenue {} for course {}", revenue, course_id);
            return Err(AppError::InvalidInput(format!(
                "revenue must be a non-negative amount, got {}",
                revenue
            )));
        }

        let updated = self
            .gateway
            .update_course_field(course_id, &CourseField::Revenue(revenue))
            .await
            .map_err(AppError::write)?;

        if !updated {
            return Err(AppError::NotFound("course"));
        }
        info!("revenue for course {} set to {}", course_id, revenue);
        Ok(())
    }

    /// Sum of revenue over courses whose start date has passed. Unset revenue counts as zero.
    pub async fn total_revenue_of_started_courses(&self) -> Result<f64, AppError> {
        Ok(self.gateway.started_revenue_total(Utc::now()).await?)
    }

    pub async fn started_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.gateway.started_courses(Utc::now()).await?)
    }

    pub async fn course_count_for_executor(&self, executor_id: &str) -> Result<i64, AppError> {
        Ok(self.gateway.count_courses_for_executor(executor_id).await?)
    }

    pub async fn total_course_count(&self) -> Result<i64, AppError> {
        Ok(self.gateway.count_courses(&CourseFilter::default()).await?)
    }

    pub async fn course_fee(&self, course_id: &str) -> Result<f64, AppError> {
        let course = self
            .gateway
            .find_course(course_id)
            .await?
            .ok_or(AppError::NotFound("course"))?;
        Ok(course.course_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{course_starting_in, setup_gateway};
    use crate::services::CourseService;

    #[tokio::test]
    async fn test_negative_revenue_is_rejected() {
        let gateway = setup_gateway().await;
        let course = CourseService::new(gateway.clone())
            .create_course(course_starting_in(-1, "exec-1"))
            .await
            .unwrap();
        let service = RevenueService::new(gateway);

        service.set_course_revenue(&course.id, 300.0).await.unwrap();

        let err = service.set_course_revenue(&course.id, -5.0).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let err = service.set_course_revenue(&course.id, f64::NAN).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        assert_eq!(service.get_course_revenue(&course.id).await.unwrap(), Some(300.0));
    }

    #[tokio::test]
    async fn test_revenue_unset_until_recorded() {
        let gateway = setup_gateway().await;
        let course = CourseService::new(gateway.clone())
            .create_course(course_starting_in(-1, "exec-1"))
            .await
            .unwrap();
        let service = RevenueService::new(gateway);

        assert_eq!(service.get_course_revenue(&course.id).await.unwrap(), None);
        assert_eq!(service.course_fee(&course.id).await.unwrap(), 1200.0);
        assert!(service.get_course_revenue("nope").await.unwrap_err().is_not_found());
        assert!(
            service
                .set_course_revenue("nope", 1.0)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_total_counts_only_started_courses() {
        let gateway = setup_gateway().await;
        let courses = CourseService::new(gateway.clone());
        let started_a = courses.create_course(course_starting_in(-10, "exec-1")).await.unwrap();
        let started_b = courses.create_course(course_starting_in(-2, "exec-1")).await.unwrap();
        let unpriced = courses.create_course(course_starting_in(-1, "exec-2")).await.unwrap();
        let upcoming = courses.create_course(course_starting_in(7, "exec-2")).await.unwrap();
        let service = RevenueService::new(gateway);

        service.set_course_revenue(&started_a.id, 1000.0).await.unwrap();
        service.set_course_revenue(&started_b.id, 250.5).await.unwrap();
        service.set_course_revenue(&upcoming.id, 9999.0).await.unwrap();

        assert_eq!(service.total_revenue_of_started_courses().await.unwrap(), 1250.5);

        let started: Vec<String> = service
            .started_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(started.len(), 3);
        assert!(started.contains(&unpriced.id));
        assert!(!started.contains(&upcoming.id));
    }

    #[tokio::test]
    async fn test_course_counts() {
        let gateway = setup_gateway().await;
        let courses = CourseService::new(gateway.clone());
        courses.create_course(course_starting_in(1, "exec-1")).await.unwrap();
        courses.create_course(course_starting_in(2, "exec-1")).await.unwrap();
        courses.create_course(course_starting_in(3, "exec-2")).await.unwrap();
        let service = RevenueService::new(gateway);

        assert_eq!(service.course_count_for_executor("exec-1").await.unwrap(), 2);
        assert_eq!(service.course_count_for_executor("unknown").await.unwrap(), 0);
        assert_eq!(service.total_course_count().await.unwrap(), 3);
    }
}
