use std::sync::Arc;

use tracing::debug;

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{RosterEntry, RosterFilter};

/// Resolves the students enrolled in a course.
pub struct RosterService {
    gateway: Arc<dyn Gateway>,
}

impl RosterService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Lists the roster of `course_id` in enrollment order.
    ///
    /// Name and company match as ASCII case-insensitive substrings, phone
    /// matches exactly. An empty roster is not an error; a missing course is.
    pub async fn list_students(
        &self,
        course_id: &str,
        filter: &RosterFilter,
    ) -> Result<Vec<RosterEntry>, AppError> {
        if self.gateway.find_course(course_id).await?.is_none() {
            return Err(AppError::NotFound("course"));
        }

        let entries = self.gateway.roster(course_id, filter).await?;
        debug!(
            "roster for course {} matched {} students (filter: {:?})",
            course_id,
            entries.len(),
            filter
        );
        Ok(entries)
    }
}
