use crate::domain::{models::attendance::Attendance, ports::AttendanceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const ATTENDANCE_COLUMNS: &str = "id, tenant_id, student_id, date, status, notes, created_at";

pub struct SqliteAttendanceRepo {
    pool: SqlitePool,
}

impl SqliteAttendanceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepo {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendance ({ATTENDANCE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
            .bind(&attendance.id)
            .bind(&attendance.tenant_id)
            .bind(&attendance.student_id)
            .bind(&attendance.date)
            .bind(&attendance.status)
            .bind(&attendance.notes)
            .bind(attendance.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR student_id = ?2) AND (?3 IS NULL OR date = ?3) \
             ORDER BY date DESC"
        ))
            .bind(tenant_id)
            .bind(student_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_in_range(
        &self,
        tenant_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR date >= ?2) AND (?3 IS NULL OR date <= ?3) \
             ORDER BY date ASC"
        ))
            .bind(tenant_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_date_status(
        &self,
        tenant_id: &str,
        date: &str,
        status: &str,
    ) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE tenant_id = ? AND date = ? AND status = ?",
        )
            .bind(tenant_id)
            .bind(date)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
