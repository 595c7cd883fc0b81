use crate::domain::{models::timetable::TimetableEntry, ports::TimetableRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTimetableRepo {
    pool: SqlitePool,
}

impl SqliteTimetableRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimetableRepository for SqliteTimetableRepo {
    async fn create(&self, entry: &TimetableEntry) -> Result<TimetableEntry, AppError> {
        sqlx::query_as::<_, TimetableEntry>(
            "INSERT INTO timetable (id, tenant_id, grade, day, period, subject, teacher_id, start_time, end_time, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, tenant_id, grade, day, period, subject, teacher_id, start_time, end_time, created_at",
        )
            .bind(&entry.id)
            .bind(&entry.tenant_id)
            .bind(&entry.grade)
            .bind(&entry.day)
            .bind(entry.period)
            .bind(&entry.subject)
            .bind(&entry.teacher_id)
            .bind(&entry.start_time)
            .bind(&entry.end_time)
            .bind(entry.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(
        &self,
        tenant_id: &str,
        grade: Option<&str>,
        day: Option<&str>,
    ) -> Result<Vec<TimetableEntry>, AppError> {
        sqlx::query_as::<_, TimetableEntry>(
            "SELECT id, tenant_id, grade, day, period, subject, teacher_id, start_time, end_time, created_at \
             FROM timetable \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR grade = ?2) AND (?3 IS NULL OR day = ?3) \
             ORDER BY period ASC",
        )
            .bind(tenant_id)
            .bind(grade)
            .bind(day)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
