use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The link between one student and one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    pub attendance: bool,
    pub paid: bool,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentFlag {
    Attendance(bool),
    Paid(bool),
}

/// An enrollment joined with the student it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RosterEntry {
    pub student_id: String,
    pub course_id: String,
    pub name: String,
    pub phone: String,
    pub company_name: String,
    pub email: String,
    pub attendance: bool,
    pub paid: bool,
}

/// Roster constraints for one query. Built once and never mutated.
///
/// `None` means the column is unconstrained. `Some("")` is a real value: an
/// empty substring for name and company, an empty phone for the exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
}

impl RosterFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }
}
