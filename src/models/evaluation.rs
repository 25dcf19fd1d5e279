use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-student feedback on a course. Distinct from the course report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Evaluation {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub rating: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvaluation {
    pub course_id: String,
    pub student_id: String,
    pub rating: i64,
    pub content: String,
}
