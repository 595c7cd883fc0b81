use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    AssignmentRepository, AttendanceRepository, FeeRepository, GradeRepository, LlmService,
    NotificationRepository, SchoolRepository, StudentRepository, TeacherRepository,
    TimetableRepository, UserRepository,
};
use crate::domain::services::connection_registry::ConnectionRegistry;
use crate::domain::services::notification_service::NotificationService;
use crate::domain::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub school_repo: Arc<dyn SchoolRepository>,
    pub student_repo: Arc<dyn StudentRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub assignment_repo: Arc<dyn AssignmentRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub grade_repo: Arc<dyn GradeRepository>,
    pub timetable_repo: Arc<dyn TimetableRepository>,
    pub fee_repo: Arc<dyn FeeRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub token_service: Arc<TokenService>,
    pub registry: Arc<ConnectionRegistry>,
    pub notification_service: Arc<NotificationService>,
    pub llm_service: Arc<dyn LlmService>,
}
