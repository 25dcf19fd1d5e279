pub mod course;
pub mod enrollment;
pub mod evaluation;
pub mod student;

pub use course::{Course, CourseField, CourseFilter, NewCourse, Page, Paged};
pub use enrollment::{Enrollment, EnrollmentFlag, RosterEntry, RosterFilter};
pub use evaluation::{Evaluation, NewEvaluation};
pub use student::{NewStudent, Student};
