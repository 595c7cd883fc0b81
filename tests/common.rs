use school_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::LlmService,
    domain::services::connection_registry::ConnectionRegistry,
    domain::services::notification_service::NotificationService,
    domain::services::token_service::TokenService,
    error::AppError,
    infra::repositories::{
        sqlite_assignment_repo::SqliteAssignmentRepo, sqlite_attendance_repo::SqliteAttendanceRepo,
        sqlite_fee_repo::SqliteFeeRepo, sqlite_grade_repo::SqliteGradeRepo,
        sqlite_notification_repo::SqliteNotificationRepo, sqlite_school_repo::SqliteSchoolRepo,
        sqlite_student_repo::SqliteStudentRepo, sqlite_teacher_repo::SqliteTeacherRepo,
        sqlite_timetable_repo::SqliteTimetableRepo, sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockLlmService;

#[async_trait]
impl LlmService for MockLlmService {
    async fn chat(&self, _message: &str, _system_instruction: &str) -> Result<String, AppError> {
        Ok("Mock AI Response: happy to help.".to_string())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            access_token_expire_minutes: 30,
            llm_api_key: String::new(),
            cors_origins: "*".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let notification_repo = Arc::new(SqliteNotificationRepo::new(pool.clone()));
        let registry = Arc::new(ConnectionRegistry::new());
        let notification_service = Arc::new(NotificationService::new(
            notification_repo.clone(),
            user_repo.clone(),
            registry.clone(),
        ));
        let token_service = Arc::new(TokenService::new(
            &config.jwt_secret,
            config.access_token_expire_minutes,
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo,
            school_repo: Arc::new(SqliteSchoolRepo::new(pool.clone())),
            student_repo: Arc::new(SqliteStudentRepo::new(pool.clone())),
            teacher_repo: Arc::new(SqliteTeacherRepo::new(pool.clone())),
            assignment_repo: Arc::new(SqliteAssignmentRepo::new(pool.clone())),
            attendance_repo: Arc::new(SqliteAttendanceRepo::new(pool.clone())),
            grade_repo: Arc::new(SqliteGradeRepo::new(pool.clone())),
            timetable_repo: Arc::new(SqliteTimetableRepo::new(pool.clone())),
            fee_repo: Arc::new(SqliteFeeRepo::new(pool.clone())),
            notification_repo,
            token_service,
            registry,
            notification_service,
            llm_service: Arc::new(MockLlmService),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a user through the public endpoint and returns the response
    /// body (the created user record).
    #[allow(dead_code)]
    pub async fn register(
        &self,
        email: &str,
        role: &str,
        tenant_id: Option<&str>,
        password: &str,
    ) -> Value {
        let payload = json!({
            "email": email,
            "full_name": format!("Test {}", role),
            "role": role,
            "tenant_id": tenant_id,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Logs in and returns the bearer access token.
    #[allow(dead_code)]
    pub async fn login(&self, email: &str, password: &str) -> String {
        let payload = json!({ "email": email, "password": password });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["access_token"].as_str().expect("No access_token in body").to_string()
    }

    /// Registers a fresh school_admin and returns (token, tenant_id) for a
    /// brand-new tenant.
    #[allow(dead_code)]
    pub async fn admin_in_new_tenant(&self, label: &str) -> (String, String) {
        let tenant_id = Uuid::new_v4().to_string();
        let email = format!("admin-{}@{}.example.com", Uuid::new_v4(), label);
        self.register(&email, "school_admin", Some(&tenant_id), "adminpass123").await;
        let token = self.login(&email, "adminpass123").await;
        (token, tenant_id)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
