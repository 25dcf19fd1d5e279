use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{Course, CourseFilter, NewCourse, Page, Paged};

/// Executor-side management of course records.
pub struct CourseService {
    gateway: Arc<dyn Gateway>,
}

impl CourseService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn create_course(&self, req: NewCourse) -> Result<Course, AppError> {
        validate(&req)?;

        let course = Course {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            company_name: req.company_name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            location: req.location,
            course_fee: req.course_fee,
            instructor_id: req.instructor_id,
            executor_id: req.executor_id,
            revenue: None,
            report: None,
        };
        self.gateway
            .insert_course(&course)
            .await
            .map_err(AppError::write)?;

        info!("course {} created by executor {}", course.id, course.executor_id);
        Ok(course)
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, AppError> {
        self.gateway
            .find_course(id)
            .await?
            .ok_or(AppError::NotFound("course"))
    }

    /// Replaces the executor-editable fields. Revenue and report are kept.
    pub async fn update_course(&self, id: &str, req: NewCourse) -> Result<Course, AppError> {
        validate(&req)?;

        let updated = self
            .gateway
            .update_course(id, &req)
            .await
            .map_err(AppError::write)?;
        if !updated {
            return Err(AppError::NotFound("course"));
        }

        info!("course {} updated", id);
        self.get_course(id).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), AppError> {
        let deleted = self
            .gateway
            .delete_course(id)
            .await
            .map_err(AppError::write)?;
        if !deleted {
            return Err(AppError::NotFound("course"));
        }

        info!("course {} deleted", id);
        Ok(())
    }

    pub async fn list_courses(
        &self,
        filter: &CourseFilter,
        page: Page,
    ) -> Result<Paged<Course>, AppError> {
        let page = Page::new(page.offset, page.page_size);
        let items = self.gateway.list_courses(filter, page).await?;
        let total = self.gateway.count_courses(filter).await?;

        Ok(Paged {
            items,
            total,
            offset: page.offset,
            page_size: page.page_size,
        })
    }

    pub async fn search_by_name(&self, name: &str, page: Page) -> Result<Paged<Course>, AppError> {
        let filter = CourseFilter {
            name: Some(name.to_string()),
            ..CourseFilter::default()
        };
        self.list_courses(&filter, page).await
    }

    pub async fn courses_for_instructor(
        &self,
        instructor_id: &str,
    ) -> Result<Vec<Course>, AppError> {
        Ok(self.gateway.courses_for_instructor(instructor_id).await?)
    }
}

fn validate(req: &NewCourse) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("course name must not be empty".to_string()));
    }
    if !req.course_fee.is_finite() || req.course_fee < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "course fee must be a non-negative amount, got {}",
            req.course_fee
        )));
    }
    if req.end_date < req.start_date {
        return Err(AppError::InvalidInput(
            "course cannot end before it starts".to_string(),
        ));
    }
    Ok(())
}
