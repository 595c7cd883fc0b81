mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_json(app: &TestApp, token: &str, uri: &str, payload: Value) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "POST {}", uri);
    parse_body(res).await
}

async fn get_report(app: &TestApp, token: &str, uri: &str) -> (String, String, String) {
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "GET {}", uri);
    let content_type = res.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    let disposition = res.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    (content_type, disposition, body_text(res).await)
}

#[tokio::test]
async fn test_students_report_csv() {
    let app = TestApp::new().await;
    let (token, _) = app.admin_in_new_tenant("reports").await;

    for (first, last, email) in [
        ("Ada", "Byron", "ada@students.test"),
        ("Cleo", "Marsh", "cleo@students.test"),
    ] {
        post_json(&app, &token, "/api/students", json!({
            "first_name": first, "last_name": last, "email": email,
            "grade": "5", "date_of_birth": "2014-01-02", "parent_email": null
        })).await;
    }

    let (content_type, disposition, csv) =
        get_report(&app, &token, "/api/reports/students").await;
    assert_eq!(content_type, "text/csv");
    assert_eq!(disposition, "attachment; filename=students_report.csv");

    let lines: Vec<&str> = csv.trim().lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,first_name,last_name,email"));
    assert!(csv.contains("ada@students.test"));
    assert!(csv.contains("cleo@students.test"));
}

#[tokio::test]
async fn test_attendance_report_respects_date_range() {
    let app = TestApp::new().await;
    let (token, _) = app.admin_in_new_tenant("reports").await;

    let student = post_json(&app, &token, "/api/students", json!({
        "first_name": "Ada", "last_name": "Byron", "email": "ada@students.test",
        "grade": "5", "date_of_birth": "2014-01-02", "parent_email": null
    })).await;

    for date in ["2026-08-01", "2026-08-02", "2026-08-03"] {
        post_json(&app, &token, "/api/attendance", json!({
            "student_id": student["id"], "date": date, "status": "present", "notes": null
        })).await;
    }

    let (_, _, csv) = get_report(
        &app,
        &token,
        "/api/reports/attendance?start_date=2026-08-02&end_date=2026-08-03",
    ).await;
    let lines: Vec<&str> = csv.trim().lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 rows
    assert!(!csv.contains("2026-08-01"));
    assert!(csv.contains("2026-08-02"));
    assert!(csv.contains("2026-08-03"));
}

#[tokio::test]
async fn test_grades_report_joins_display_names() {
    let app = TestApp::new().await;
    let (token, _) = app.admin_in_new_tenant("reports").await;

    let student = post_json(&app, &token, "/api/students", json!({
        "first_name": "Noa", "last_name": "Berg", "email": "noa@students.test",
        "grade": "8", "date_of_birth": "2011-05-05", "parent_email": null
    })).await;
    let assignment = post_json(&app, &token, "/api/assignments", json!({
        "title": "Essay One", "description": "Two pages", "due_date": "2026-08-20",
        "subject": "English", "teacher_id": "t-1", "grade": "8", "max_score": 20.0
    })).await;
    post_json(&app, &token, "/api/grades", json!({
        "assignment_id": assignment["id"], "student_id": student["id"],
        "score": 17.5, "feedback": "Strong opening"
    })).await;

    let (_, _, csv) = get_report(&app, &token, "/api/reports/grades").await;
    let lines: Vec<&str> = csv.trim().lines().collect();
    assert_eq!(lines[0], "student_name,assignment,score,feedback,created_at");
    assert!(csv.contains("Noa Berg"));
    assert!(csv.contains("Essay One"));
    assert!(csv.contains("17.5"));
}

#[tokio::test]
async fn test_reports_only_cover_own_tenant() {
    let app = TestApp::new().await;
    let (token_a, _) = app.admin_in_new_tenant("alpha").await;
    let (token_b, _) = app.admin_in_new_tenant("beta").await;

    post_json(&app, &token_a, "/api/students", json!({
        "first_name": "Only", "last_name": "Mine", "email": "mine@students.test",
        "grade": "5", "date_of_birth": "2014-01-02", "parent_email": null
    })).await;

    let (_, _, csv) = get_report(&app, &token_b, "/api/reports/students").await;
    assert!(!csv.contains("mine@students.test"));
    assert_eq!(csv.trim().lines().count(), 1); // header only
}
