mod common;

use axum::http::{Method, StatusCode};

use common::{create_course, create_student, enroll, send, send_text, test_app};

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flag"], true);
}

#[tokio::test]
async fn test_roster_scenario() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", 2, "exec-1").await;
    let s1 = create_student(&app, "Li Wei", "111", "Acme").await;
    let s2 = create_student(&app, "Zhang San", "222", "Globex").await;
    enroll(&app, &s1, &course_id).await;
    enroll(&app, &s2, &course_id).await;

    let uri = format!("/staff/courses/{}/students", course_id);
    let (_, all) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(all["flag"], true);
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
    assert_eq!(all["data"][0]["student_id"], s1.as_str());

    let (_, by_phone) = send(&app, Method::GET, &format!("{}?phone=111", uri), None).await;
    let rows = by_phone["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student_id"], s1.as_str());
    assert_eq!(rows[0]["name"], "Li Wei");

    let (_, empty_phone) = send(&app, Method::GET, &format!("{}?phone=", uri), None).await;
    assert_eq!(empty_phone["flag"], true);
    assert!(empty_phone["data"].as_array().unwrap().is_empty());

    let (_, by_name) = send(&app, Method::GET, &format!("{}?name=zhang", uri), None).await;
    assert_eq!(by_name["data"][0]["student_id"], s2.as_str());
}

#[tokio::test]
async fn test_roster_for_missing_course() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/staff/courses/nope/students", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["flag"], false);
    assert!(body["data"].is_null());
    assert!(body["errorMsg"].as_str().unwrap().starts_with("failed to list students"));
}

#[tokio::test]
async fn test_attendance_and_payment_flags() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", -1, "exec-1").await;
    let student_id = create_student(&app, "Li Wei", "111", "Acme").await;
    enroll(&app, &student_id, &course_id).await;

    let attend = format!("/staff/attendance/{}/{}/true", student_id, course_id);
    let (_, first) = send(&app, Method::PUT, &attend, None).await;
    let (_, second) = send(&app, Method::PUT, &attend, None).await;
    assert_eq!(first["flag"], true);
    assert_eq!(second["flag"], true);

    let pay = format!("/staff/payment/{}/{}/true", student_id, course_id);
    let (_, paid) = send(&app, Method::PUT, &pay, None).await;
    assert_eq!(paid["flag"], true);

    let (_, roster) = send(
        &app,
        Method::GET,
        &format!("/staff/courses/{}/students", course_id),
        None,
    )
    .await;
    assert_eq!(roster["data"][0]["attendance"], true);
    assert_eq!(roster["data"][0]["paid"], true);
}

#[tokio::test]
async fn test_flags_on_missing_enrollment() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", -1, "exec-1").await;
    let student_id = create_student(&app, "Li Wei", "111", "Acme").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/staff/attendance/{}/{}/true", student_id, course_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["flag"], false);
    assert!(
        body["errorMsg"]
            .as_str()
            .unwrap()
            .starts_with("failed to update attendance")
    );

    let (_, roster) = send(
        &app,
        Method::GET,
        &format!("/staff/courses/{}/students", course_id),
        None,
    )
    .await;
    assert!(roster["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_round_trip() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", -1, "exec-1").await;
    let uri = format!("/staff/report/{}", course_id);

    let (_, empty) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(empty["data"], "");

    let (_, put) = send_text(&app, Method::PUT, &uri, "Great course, more exercises next time").await;
    assert_eq!(put["flag"], true);
    let (_, got) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(got["data"], "Great course, more exercises next time");

    send_text(&app, Method::PUT, &uri, "").await;
    let (_, cleared) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(cleared["data"], "");
}

#[tokio::test]
async fn test_evaluations() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", -1, "exec-1").await;
    let student_id = create_student(&app, "Li Wei", "111", "Acme").await;

    let (_, missing) = send(&app, Method::DELETE, "/staff/evaluation/e1", None).await;
    assert_eq!(missing["flag"], false);

    let (_, created) = send(
        &app,
        Method::POST,
        "/evaluations",
        Some(serde_json::json!({
            "course_id": course_id,
            "student_id": student_id,
            "rating": 5,
            "content": "excellent",
        })),
    )
    .await;
    assert_eq!(created["flag"], true);
    let evaluation_id = created["data"]["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&app, Method::GET, &format!("/staff/evaluation/{}", course_id), None).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (_, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/staff/evaluation/{}", evaluation_id),
        None,
    )
    .await;
    assert_eq!(deleted["flag"], true);

    let (_, after) = send(&app, Method::GET, &format!("/staff/evaluation/{}", course_id), None).await;
    assert!(after["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_requests_return_envelope() {
    let app = test_app().await;
    let course_id = create_course(&app, "Rust 101", -1, "exec-1").await;

    let (status, bad_flag) = send(&app, Method::PUT, "/staff/attendance/s/c/maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_flag["flag"], false);
    assert!(bad_flag["data"].is_null());
    assert!(
        bad_flag["errorMsg"]
            .as_str()
            .unwrap()
            .starts_with("malformed request")
    );

    let (status, bad_revenue) = send(
        &app,
        Method::PUT,
        &format!("/courses/{}/revenue", course_id),
        Some(serde_json::json!({ "revenue": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_revenue["flag"], false);

    let (status, bad_offset) = send(&app, Method::GET, "/executor/courses?offset=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_offset["flag"], false);

    let (_, revenue) = send(&app, Method::GET, &format!("/courses/{}/revenue", course_id), None).await;
    assert!(revenue["data"].is_null());
}
