use crate::domain::{models::student::Student, ports::StudentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const STUDENT_COLUMNS: &str =
    "id, tenant_id, first_name, last_name, email, grade, date_of_birth, parent_email, is_active, created_at";

pub struct SqliteStudentRepo {
    pool: SqlitePool,
}

impl SqliteStudentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepo {
    async fn create(&self, student: &Student) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students ({STUDENT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {STUDENT_COLUMNS}"
        ))
            .bind(&student.id)
            .bind(&student.tenant_id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.grade)
            .bind(&student.date_of_birth)
            .bind(&student.parent_email)
            .bind(student.is_active)
            .bind(student.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE tenant_id = ? AND id = ?"
        ))
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str, grade: Option<&str>) -> Result<Vec<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE tenant_id = ?1 AND (?2 IS NULL OR grade = ?2) \
             ORDER BY last_name ASC, first_name ASC"
        ))
            .bind(tenant_id)
            .bind(grade)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    // Scoped by tenant as well as id: a row in another tenant updates
    // nothing and surfaces as absent.
    async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET first_name = ?, last_name = ?, email = ?, grade = ?, \
             date_of_birth = ?, parent_email = ? \
             WHERE id = ? AND tenant_id = ? \
             RETURNING {STUDENT_COLUMNS}"
        ))
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.grade)
            .bind(&student.date_of_birth)
            .bind(&student.parent_email)
            .bind(&student.id)
            .bind(&student.tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE tenant_id = ? AND is_active = 1",
        )
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
