mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn list_notifications(app: &TestApp, token: &str, unread_only: bool) -> Value {
    let uri = if unread_only {
        "/api/notifications?unread_only=true"
    } else {
        "/api/notifications"
    };
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_fee_payment_notifies_every_admin_in_tenant() {
    let app = TestApp::new().await;
    let (admin_token, tenant) = app.admin_in_new_tenant("billing").await;

    // A second admin and an uninvolved tenant's admin.
    let second = app.register("second-admin@billing.test", "school_admin", Some(&tenant), "adminpass123").await;
    let second_token = app.login("second-admin@billing.test", "adminpass123").await;
    let (other_token, _) = app.admin_in_new_tenant("elsewhere").await;

    // Student + fee in the tenant.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/students")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "first_name": "Mia", "last_name": "Lopez",
                "email": "mia@students.test", "grade": "6",
                "date_of_birth": "2013-01-15", "parent_email": null
            }).to_string())).unwrap()
    ).await.unwrap();
    let student = parse_body(res).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/fees")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "student_id": student["id"], "amount": 250.0,
                "due_date": "2026-09-01", "description": "Tuition", "status": "pending"
            }).to_string())).unwrap()
    ).await.unwrap();
    let fee = parse_body(res).await;

    // One admin holds a live connection while the fee is paid.
    let second_id = second["id"].as_str().unwrap();
    let mut live = app.state.registry.connect(&tenant, second_id, "tab-1").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/fees/{}/pay", fee["id"].as_str().unwrap()))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Both admins got a durable row, unread, typed "fee".
    for token in [&admin_token, &second_token] {
        let rows = list_notifications(&app, token, false).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["type"], "fee");
        assert_eq!(rows[0]["read"], false);
        assert!(rows[0]["message"].as_str().unwrap().contains("Mia Lopez"));
    }

    // The connected admin also got the live push.
    let pushed = live.recv().await.unwrap();
    assert_eq!(pushed["type"], "fee");
    assert_eq!(pushed["user_id"], second_id);

    // Nothing leaked into the other tenant.
    let rows = list_notifications(&app, &other_token, false).await;
    assert_eq!(rows.as_array().unwrap().len(), 0);

    // The fee itself is settled.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/fees?status=paid")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let paid = parse_body(res).await;
    assert_eq!(paid.as_array().unwrap().len(), 1);
    assert!(paid[0]["paid_date"].is_string());
}

#[tokio::test]
async fn test_assignment_creation_notifies_students_of_grade() {
    let app = TestApp::new().await;
    let (admin_token, tenant) = app.admin_in_new_tenant("homework").await;

    // Two student records; only one has a matching student account + grade.
    for (name, email, grade) in [
        ("Noa", "noa@students.test", "8"),
        ("Liv", "liv@students.test", "9"),
    ] {
        let res = app.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/students")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "first_name": name, "last_name": "Student", "email": email,
                    "grade": grade, "date_of_birth": "2011-05-05", "parent_email": null
                }).to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
    app.register("noa@students.test", "student", Some(&tenant), "studentpw1").await;
    let noa_token = app.login("noa@students.test", "studentpw1").await;
    app.register("liv@students.test", "student", Some(&tenant), "studentpw1").await;
    let liv_token = app.login("liv@students.test", "studentpw1").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/assignments")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "title": "Fractions worksheet", "description": "Pages 10-12",
                "due_date": "2026-08-20", "subject": "Math",
                "teacher_id": "t-1", "grade": "8", "max_score": 100.0
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let rows = list_notifications(&app, &noa_token, true).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "assignment");
    assert!(rows[0]["message"].as_str().unwrap().contains("Fractions worksheet"));

    // Wrong grade: no notification.
    let rows = list_notifications(&app, &liv_token, true).await;
    assert_eq!(rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_notification_read_and_delete_lifecycle() {
    let app = TestApp::new().await;
    let (token, tenant) = app.admin_in_new_tenant("inbox").await;

    let me = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let me = parse_body(me).await;
    let user_id = me["id"].as_str().unwrap();

    for n in 1..=3 {
        app.state.notification_service
            .notify("Heads up", &format!("message {}", n), "general", user_id, &tenant)
            .await
            .unwrap();
    }

    let rows = list_notifications(&app, &token, true).await;
    assert_eq!(rows.as_array().unwrap().len(), 3);
    let first_id = rows[0]["id"].as_str().unwrap().to_string();

    // Mark one read; the unread filter drops it.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/notifications/{}/read", first_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(list_notifications(&app, &token, true).await.as_array().unwrap().len(), 2);
    assert_eq!(list_notifications(&app, &token, false).await.as_array().unwrap().len(), 3);

    // read-all clears the rest.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/notifications/read-all")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(list_notifications(&app, &token, true).await.as_array().unwrap().len(), 0);

    // Delete one; deleting it again is 404. Another user's id is 404 too.
    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/notifications/{}", first_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/notifications/{}", first_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_broadcast_skips_excluded_user_and_push_is_best_effort() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4().to_string();

    let sender = app.register("sender@cast.test", "school_admin", Some(&tenant), "adminpass123").await;
    app.register("peer-a@cast.test", "teacher", Some(&tenant), "teacherpw12").await;
    app.register("peer-b@cast.test", "student", Some(&tenant), "studentpw12").await;

    // Nobody is connected — the pushes all miss, the rows still land.
    let notified = app.state.notification_service
        .broadcast(
            "School closed",
            "Snow day tomorrow",
            "general",
            &tenant,
            Some(sender["id"].as_str().unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(notified, 2);

    let a_token = app.login("peer-a@cast.test", "teacherpw12").await;
    let rows = list_notifications(&app, &a_token, true).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);

    let sender_token = app.login("sender@cast.test", "adminpass123").await;
    let rows = list_notifications(&app, &sender_token, true).await;
    assert_eq!(rows.as_array().unwrap().len(), 0);
}
