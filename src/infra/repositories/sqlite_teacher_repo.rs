use crate::domain::{models::teacher::Teacher, ports::TeacherRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTeacherRepo {
    pool: SqlitePool,
}

impl SqliteTeacherRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for SqliteTeacherRepo {
    async fn create(&self, teacher: &Teacher) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (id, tenant_id, first_name, last_name, email, subjects, qualification, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, tenant_id, first_name, last_name, email, subjects, qualification, is_active, created_at",
        )
            .bind(&teacher.id)
            .bind(&teacher.tenant_id)
            .bind(&teacher.first_name)
            .bind(&teacher.last_name)
            .bind(&teacher.email)
            .bind(&teacher.subjects)
            .bind(&teacher.qualification)
            .bind(teacher.is_active)
            .bind(teacher.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, tenant_id, first_name, last_name, email, subjects, qualification, is_active, created_at \
             FROM teachers WHERE tenant_id = ? ORDER BY last_name ASC, first_name ASC",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM teachers WHERE tenant_id = ? AND is_active = 1",
        )
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
