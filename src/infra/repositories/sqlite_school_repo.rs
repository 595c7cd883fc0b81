use crate::domain::{models::school::School, ports::SchoolRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSchoolRepo {
    pool: SqlitePool,
}

impl SqliteSchoolRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for SqliteSchoolRepo {
    async fn create(&self, school: &School) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(
            "INSERT INTO schools (id, tenant_id, name, address, contact_email, contact_phone, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, tenant_id, name, address, contact_email, contact_phone, is_active, created_at",
        )
            .bind(&school.id)
            .bind(&school.tenant_id)
            .bind(&school.name)
            .bind(&school.address)
            .bind(&school.contact_email)
            .bind(&school.contact_phone)
            .bind(school.is_active)
            .bind(school.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    // The one tenant-global read in the system; reachable only from the
    // super_admin branch of the schools listing.
    async fn list_all(&self) -> Result<Vec<School>, AppError> {
        sqlx::query_as::<_, School>(
            "SELECT id, tenant_id, name, address, contact_email, contact_phone, is_active, created_at \
             FROM schools ORDER BY name ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<School>, AppError> {
        sqlx::query_as::<_, School>(
            "SELECT id, tenant_id, name, address, contact_email, contact_phone, is_active, created_at \
             FROM schools WHERE tenant_id = ? ORDER BY name ASC",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
