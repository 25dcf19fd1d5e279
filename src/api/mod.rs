pub mod envelope;
pub mod extract;

use axum::routing::{post, put};
use axum::{Router, extract::State, routing::get};
use serde::Deserialize;

pub use envelope::Envelope;
pub use extract::{ApiJson, ApiPath, ApiQuery, ApiText};

use crate::error::AppError;
use crate::models::*;
use crate::services::{
    AttendanceService, CourseService, RevenueService, RosterService, StudentService,
    SurveyService,
};
use crate::state::AppState;

#[derive(Deserialize)]
struct CourseListParams {
    name: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    offset: Option<u32>,
    page_size: Option<u32>,
}

#[derive(Deserialize)]
struct RevenueBody {
    revenue: f64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/staff/courses/{course_id}/students", get(list_students))
        .route(
            "/staff/attendance/{student_id}/{course_id}/{attended}",
            put(set_attendance),
        )
        .route("/staff/payment/{student_id}/{course_id}/{paid}", put(set_payment))
        .route("/staff/report/{course_id}", get(get_report).put(set_report))
        .route(
            "/staff/evaluation/{id}",
            get(list_evaluations).delete(delete_evaluation),
        )
        .route(
            "/courses/{course_id}/revenue",
            get(get_course_revenue).put(set_course_revenue),
        )
        .route("/courses/{course_id}/fee", get(get_course_fee))
        .route("/manager/revenue/total", get(total_revenue))
        .route(
            "/manager/executors/{executor_id}/course-count",
            get(executor_course_count),
        )
        .route("/manager/courses/count", get(total_course_count))
        .route("/manager/courses/started", get(started_courses))
        .route("/executor/courses", get(list_courses).post(create_course))
        .route(
            "/executor/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/instructor/{instructor_id}/courses", get(instructor_courses))
        .route("/students", get(all_students).post(create_student))
        .route("/students/{student_id}/courses/{course_id}", post(enroll))
        .route("/evaluations", post(submit_evaluation))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Envelope<()> {
    let result = sqlx::query("select 1")
        .execute(&state.db)
        .await
        .map(|_| ())
        .map_err(AppError::from);
    Envelope::from_result(result, "health check failed")
}

// Absent query keys stay `None`; `?name=` arrives as `Some("")`.
async fn list_students(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
    ApiQuery(filter): ApiQuery<RosterFilter>,
) -> Envelope<Vec<RosterEntry>> {
    let service = RosterService::new(state.gateway.clone());
    Envelope::from_result(
        service.list_students(&course_id, &filter).await,
        "failed to list students",
    )
}

async fn set_attendance(
    State(state): State<AppState>,
    ApiPath((student_id, course_id, attended)): ApiPath<(String, String, bool)>,
) -> Envelope<()> {
    let service = AttendanceService::new(state.gateway.clone());
    Envelope::from_result(
        service.set_attendance(&student_id, &course_id, attended).await,
        "failed to update attendance",
    )
}

async fn set_payment(
    State(state): State<AppState>,
    ApiPath((student_id, course_id, paid)): ApiPath<(String, String, bool)>,
) -> Envelope<()> {
    let service = AttendanceService::new(state.gateway.clone());
    Envelope::from_result(
        service.set_payment(&student_id, &course_id, paid).await,
        "failed to update payment status",
    )
}

async fn get_report(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
) -> Envelope<String> {
    let service = SurveyService::new(state.gateway.clone());
    Envelope::from_result(
        service.get_report(&course_id).await,
        "failed to fetch survey report",
    )
}

async fn set_report(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
    ApiText(report): ApiText,
) -> Envelope<()> {
    let service = SurveyService::new(state.gateway.clone());
    Envelope::from_result(
        service.set_report(&course_id, report).await,
        "failed to update survey report",
    )
}

async fn list_evaluations(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
) -> Envelope<Vec<Evaluation>> {
    let service = SurveyService::new(state.gateway.clone());
    Envelope::from_result(
        service.list_evaluations(&course_id).await,
        "failed to list evaluations",
    )
}

async fn delete_evaluation(
    State(state): State<AppState>,
    ApiPath(evaluation_id): ApiPath<String>,
) -> Envelope<()> {
    let service = SurveyService::new(state.gateway.clone());
    Envelope::from_result(
        service.delete_evaluation(&evaluation_id).await,
        "failed to delete evaluation",
    )
}

async fn submit_evaluation(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewEvaluation>,
) -> Envelope<Evaluation> {
    let service = SurveyService::new(state.gateway.clone());
    Envelope::from_result(
        service.submit_evaluation(req).await,
        "failed to submit evaluation",
    )
}

async fn get_course_revenue(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
) -> Envelope<Option<f64>> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.get_course_revenue(&course_id).await,
        "failed to fetch course revenue",
    )
}

async fn set_course_revenue(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
    ApiJson(body): ApiJson<RevenueBody>,
) -> Envelope<()> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.set_course_revenue(&course_id, body.revenue).await,
        "failed to update course revenue",
    )
}

async fn get_course_fee(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<String>,
) -> Envelope<f64> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.course_fee(&course_id).await,
        "failed to fetch course fee",
    )
}

async fn total_revenue(State(state): State<AppState>) -> Envelope<f64> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.total_revenue_of_started_courses().await,
        "failed to compute total revenue",
    )
}

async fn executor_course_count(
    State(state): State<AppState>,
    ApiPath(executor_id): ApiPath<String>,
) -> Envelope<i64> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.course_count_for_executor(&executor_id).await,
        "failed to count executor courses",
    )
}

async fn total_course_count(State(state): State<AppState>) -> Envelope<i64> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.total_course_count().await,
        "failed to count courses",
    )
}

async fn started_courses(State(state): State<AppState>) -> Envelope<Vec<Course>> {
    let service = RevenueService::new(state.gateway.clone());
    Envelope::from_result(
        service.started_courses().await,
        "failed to list started courses",
    )
}

async fn list_courses(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CourseListParams>,
) -> Envelope<Paged<Course>> {
    let filter = CourseFilter {
        name: params.name,
        company_name: params.company_name,
        location: params.location,
    };
    let page = Page::new(
        params.offset.unwrap_or(0),
        params.page_size.unwrap_or(Page::DEFAULT_PAGE_SIZE),
    );
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(
        service.list_courses(&filter, page).await,
        "failed to list courses",
    )
}

async fn create_course(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewCourse>,
) -> Envelope<Course> {
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(service.create_course(req).await, "failed to create course")
}

async fn get_course(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Envelope<Course> {
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(service.get_course(&id).await, "failed to fetch course")
}

async fn update_course(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<NewCourse>,
) -> Envelope<Course> {
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(
        service.update_course(&id, req).await,
        "failed to update course",
    )
}

async fn delete_course(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Envelope<()> {
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(service.delete_course(&id).await, "failed to delete course")
}

async fn instructor_courses(
    State(state): State<AppState>,
    ApiPath(instructor_id): ApiPath<String>,
) -> Envelope<Vec<Course>> {
    let service = CourseService::new(state.gateway.clone());
    Envelope::from_result(
        service.courses_for_instructor(&instructor_id).await,
        "failed to list instructor courses",
    )
}

async fn all_students(State(state): State<AppState>) -> Envelope<Vec<Student>> {
    let service = StudentService::new(state.gateway.clone());
    Envelope::from_result(service.all_students().await, "failed to list students")
}

async fn create_student(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewStudent>,
) -> Envelope<Student> {
    let service = StudentService::new(state.gateway.clone());
    Envelope::from_result(service.create_student(req).await, "failed to create student")
}

async fn enroll(
    State(state): State<AppState>,
    ApiPath((student_id, course_id)): ApiPath<(String, String)>,
) -> Envelope<Enrollment> {
    let service = StudentService::new(state.gateway.clone());
    Envelope::from_result(
        service.enroll(&student_id, &course_id).await,
        "failed to enroll student",
    )
}
