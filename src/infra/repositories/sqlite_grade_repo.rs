use crate::domain::{models::grade::Grade, ports::GradeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGradeRepo {
    pool: SqlitePool,
}

impl SqliteGradeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradeRepository for SqliteGradeRepo {
    async fn create(&self, grade: &Grade) -> Result<Grade, AppError> {
        sqlx::query_as::<_, Grade>(
            "INSERT INTO grades (id, tenant_id, assignment_id, student_id, score, feedback, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, tenant_id, assignment_id, student_id, score, feedback, created_at",
        )
            .bind(&grade.id)
            .bind(&grade.tenant_id)
            .bind(&grade.assignment_id)
            .bind(&grade.student_id)
            .bind(grade.score)
            .bind(&grade.feedback)
            .bind(grade.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        assignment_id: Option<&str>,
    ) -> Result<Vec<Grade>, AppError> {
        sqlx::query_as::<_, Grade>(
            "SELECT id, tenant_id, assignment_id, student_id, score, feedback, created_at \
             FROM grades \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR student_id = ?2) AND (?3 IS NULL OR assignment_id = ?3) \
             ORDER BY created_at DESC",
        )
            .bind(tenant_id)
            .bind(student_id)
            .bind(assignment_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
