use crate::domain::{models::assignment::Assignment, ports::AssignmentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAssignmentRepo {
    pool: SqlitePool,
}

impl SqliteAssignmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepo {
    async fn create(&self, assignment: &Assignment) -> Result<Assignment, AppError> {
        sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (id, tenant_id, title, description, due_date, subject, teacher_id, grade, max_score, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, tenant_id, title, description, due_date, subject, teacher_id, grade, max_score, created_at",
        )
            .bind(&assignment.id)
            .bind(&assignment.tenant_id)
            .bind(&assignment.title)
            .bind(&assignment.description)
            .bind(&assignment.due_date)
            .bind(&assignment.subject)
            .bind(&assignment.teacher_id)
            .bind(&assignment.grade)
            .bind(assignment.max_score)
            .bind(assignment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str, grade: Option<&str>) -> Result<Vec<Assignment>, AppError> {
        sqlx::query_as::<_, Assignment>(
            "SELECT id, tenant_id, title, description, due_date, subject, teacher_id, grade, max_score, created_at \
             FROM assignments WHERE tenant_id = ?1 AND (?2 IS NULL OR grade = ?2) \
             ORDER BY due_date ASC",
        )
            .bind(tenant_id)
            .bind(grade)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self, tenant_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assignments WHERE tenant_id = ?")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
