use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{
    ai, assignment, attendance, auth, dashboard, fee, grade, health, notification, report,
    school, student, teacher, timetable,
};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))

        // Schools (super_admin creates; listing is the one global read)
        .route("/api/schools", post(school::create_school).get(school::list_schools))

        // Students
        .route("/api/students", post(student::create_student).get(student::list_students))
        .route(
            "/api/students/{student_id}",
            get(student::get_student)
                .put(student::update_student)
                .delete(student::delete_student),
        )
        .route("/api/students/bulk-import", post(student::bulk_import_students))

        // Teachers
        .route("/api/teachers", post(teacher::create_teacher).get(teacher::list_teachers))
        .route("/api/teachers/bulk-import", post(teacher::bulk_import_teachers))

        // Academics
        .route(
            "/api/assignments",
            post(assignment::create_assignment).get(assignment::list_assignments),
        )
        .route(
            "/api/attendance",
            post(attendance::mark_attendance).get(attendance::list_attendance),
        )
        .route("/api/grades", post(grade::create_grade).get(grade::list_grades))
        .route(
            "/api/timetable",
            post(timetable::create_timetable_entry).get(timetable::list_timetable),
        )

        // Fees
        .route("/api/fees", post(fee::create_fee).get(fee::list_fees))
        .route("/api/fees/{fee_id}/pay", put(fee::pay_fee))

        // Notifications
        .route("/api/notifications", get(notification::list_notifications))
        .route("/api/notifications/ws", get(notification::notifications_ws))
        .route("/api/notifications/read-all", put(notification::mark_all_notifications_read))
        .route(
            "/api/notifications/{notification_id}",
            delete(notification::delete_notification),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            put(notification::mark_notification_read),
        )

        // Reports & dashboard
        .route("/api/reports/attendance", get(report::attendance_report))
        .route("/api/reports/grades", get(report::grades_report))
        .route("/api/reports/students", get(report::students_report))
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))

        // AI
        .route("/api/ai/chat", post(ai::ai_chat))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(list))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
