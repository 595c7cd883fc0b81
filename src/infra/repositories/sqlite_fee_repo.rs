use crate::domain::models::fee::{Fee, FEE_STATUS_PAID};
use crate::domain::ports::FeeRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const FEE_COLUMNS: &str =
    "id, tenant_id, student_id, amount, due_date, description, status, paid_date, created_at";

pub struct SqliteFeeRepo {
    pool: SqlitePool,
}

impl SqliteFeeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeeRepository for SqliteFeeRepo {
    async fn create(&self, fee: &Fee) -> Result<Fee, AppError> {
        sqlx::query_as::<_, Fee>(&format!(
            "INSERT INTO fees ({FEE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {FEE_COLUMNS}"
        ))
            .bind(&fee.id)
            .bind(&fee.tenant_id)
            .bind(&fee.student_id)
            .bind(fee.amount)
            .bind(&fee.due_date)
            .bind(&fee.description)
            .bind(&fee.status)
            .bind(fee.paid_date)
            .bind(fee.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(&format!(
            "SELECT {FEE_COLUMNS} FROM fees WHERE tenant_id = ? AND id = ?"
        ))
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(
        &self,
        tenant_id: &str,
        student_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(&format!(
            "SELECT {FEE_COLUMNS} FROM fees \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR student_id = ?2) AND (?3 IS NULL OR status = ?3) \
             ORDER BY due_date ASC"
        ))
            .bind(tenant_id)
            .bind(student_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_paid(
        &self,
        tenant_id: &str,
        id: &str,
        paid_date: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE fees SET status = ?, paid_date = ? WHERE id = ? AND tenant_id = ?",
        )
            .bind(FEE_STATUS_PAID)
            .bind(paid_date)
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self, tenant_id: &str, status: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fees WHERE tenant_id = ? AND status = ?")
            .bind(tenant_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
