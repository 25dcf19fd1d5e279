#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use training_desk::api::router;
use training_desk::db;
use training_desk::state::AppState;

pub async fn test_app() -> Router {
    let pool = db::open_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to create database");
    router(AppState::new(pool))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    send_request(app, request).await
}

pub async fn send_text(app: &Router, method: Method, uri: &str, text: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(text.to_string()))
        .expect("Failed to build request");

    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, value)
}

pub fn course_body(name: &str, days_from_now: i64, executor_id: &str) -> Value {
    let start = Utc::now() + Duration::days(days_from_now);
    json!({
        "name": name,
        "company_name": "Acme Training",
        "description": "workshop",
        "start_date": start,
        "end_date": start + Duration::days(2),
        "location": "Room 101",
        "course_fee": 900.0,
        "instructor_id": "instructor-1",
        "executor_id": executor_id,
    })
}

pub async fn create_course(app: &Router, name: &str, days_from_now: i64, executor_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/executor/courses",
        Some(course_body(name, days_from_now, executor_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create course failed: {}", body);
    body["data"]["id"].as_str().expect("course id").to_string()
}

pub async fn create_student(app: &Router, name: &str, phone: &str, company_name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/students",
        Some(json!({
            "name": name,
            "phone": phone,
            "company_name": company_name,
            "email": format!("{}@example.com", phone),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create student failed: {}", body);
    body["data"]["id"].as_str().expect("student id").to_string()
}

pub async fn enroll(app: &Router, student_id: &str, course_id: &str) {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/students/{}/courses/{}", student_id, course_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "enroll failed: {}", body);
}
