use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub company_name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub course_fee: f64,
    pub instructor_id: String,
    pub executor_id: String,
    pub revenue: Option<f64>,
    pub report: Option<String>,
}

/// Executor-editable fields, used both to create a course and to replace one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub course_fee: f64,
    pub instructor_id: String,
    pub executor_id: String,
}

/// A single staff-writable column of a course.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseField {
    Revenue(f64),
    Report(String),
}

/// Substring filters for course listings. `None` leaves a column unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourseFilter {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub page_size: u32,
}

impl Page {
    pub const MAX_PAGE_SIZE: u32 = 100;
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn new(offset: u32, page_size: u32) -> Self {
        Self {
            offset,
            page_size: page_size.min(Self::MAX_PAGE_SIZE),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: u32,
    pub page_size: u32,
}
