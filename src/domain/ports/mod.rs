use crate::domain::models::{
    assignment::Assignment, attendance::Attendance, fee::Fee, grade::Grade,
    notification::Notification, school::School, student::Student, teacher::Teacher,
    timetable::TimetableEntry, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Every repository below is tenant-scoped: reads filter on the caller's
// tenant_id, and update/delete match `id AND tenant_id` so that a record in
// another tenant is indistinguishable from one that does not exist. The only
// exceptions are the user lookups that run before a tenant is known (login,
// token resolution) and the super_admin-only `SchoolRepository::list_all`.

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn create(&self, school: &School) -> Result<School, AppError>;
    async fn list_all(&self) -> Result<Vec<School>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<School>, AppError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, student: &Student) -> Result<Student, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Student>, AppError>;
    async fn list(&self, tenant_id: &str, grade: Option<&str>) -> Result<Vec<Student>, AppError>;
    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<bool, AppError>;
    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create(&self, teacher: &Teacher) -> Result<Teacher, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<Teacher>, AppError>;
    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: &Assignment) -> Result<Assignment, AppError>;
    async fn list(&self, tenant_id: &str, grade: Option<&str>) -> Result<Vec<Assignment>, AppError>;
    async fn count(&self, tenant_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError>;
    async fn list_in_range(
        &self,
        tenant_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError>;
    async fn count_by_date_status(
        &self,
        tenant_id: &str,
        date: &str,
        status: &str,
    ) -> Result<i64, AppError>;
}

#[async_trait]
pub trait GradeRepository: Send + Sync {
    async fn create(&self, grade: &Grade) -> Result<Grade, AppError>;
    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        assignment_id: Option<&str>,
    ) -> Result<Vec<Grade>, AppError>;
}

#[async_trait]
pub trait TimetableRepository: Send + Sync {
    async fn create(&self, entry: &TimetableEntry) -> Result<TimetableEntry, AppError>;
    async fn list(
        &self,
        tenant_id: &str,
        grade: Option<&str>,
        day: Option<&str>,
    ) -> Result<Vec<TimetableEntry>, AppError>;
}

#[async_trait]
pub trait FeeRepository: Send + Sync {
    async fn create(&self, fee: &Fee) -> Result<Fee, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Fee>, AppError>;
    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Fee>, AppError>;
    async fn mark_paid(
        &self,
        tenant_id: &str,
        id: &str,
        paid_date: DateTime<Utc>,
    ) -> Result<bool, AppError>;
    async fn count_by_status(&self, tenant_id: &str, status: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError>;
    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError>;
    async fn mark_read(&self, tenant_id: &str, user_id: &str, id: &str) -> Result<bool, AppError>;
    async fn mark_all_read(&self, tenant_id: &str, user_id: &str) -> Result<u64, AppError>;
    async fn delete(&self, tenant_id: &str, user_id: &str, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait LlmService: Send + Sync {
    async fn chat(&self, message: &str, system_instruction: &str) -> Result<String, AppError>;
}
