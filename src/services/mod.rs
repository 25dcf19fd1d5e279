pub mod attendance;
pub mod courses;
pub mod revenue;
pub mod roster;
pub mod students;
pub mod survey;

pub use attendance::AttendanceService;
pub use courses::CourseService;
pub use revenue::RevenueService;
pub use roster::RosterService;
pub use students::StudentService;
pub use survey::SurveyService;
