use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::connection_registry::ConnectionRegistry;
use crate::domain::services::notification_service::NotificationService;
use crate::domain::services::token_service::TokenService;
use crate::infra::ai::openai_service::OpenAiService;
use crate::infra::repositories::{
    sqlite_assignment_repo::SqliteAssignmentRepo, sqlite_attendance_repo::SqliteAttendanceRepo,
    sqlite_fee_repo::SqliteFeeRepo, sqlite_grade_repo::SqliteGradeRepo,
    sqlite_notification_repo::SqliteNotificationRepo, sqlite_school_repo::SqliteSchoolRepo,
    sqlite_student_repo::SqliteStudentRepo, sqlite_teacher_repo::SqliteTeacherRepo,
    sqlite_timetable_repo::SqliteTimetableRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

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
    let llm_service = Arc::new(OpenAiService::new(config.llm_api_key.clone()));

    AppState {
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
        llm_service,
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
