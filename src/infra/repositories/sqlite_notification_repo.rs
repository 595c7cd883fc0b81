use crate::domain::{models::notification::Notification, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const NOTIFICATION_COLUMNS: &str =
    "id, tenant_id, user_id, title, message, notification_type, read, created_at";

pub struct SqliteNotificationRepo {
    pool: SqlitePool,
}

impl SqliteNotificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepo {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications ({NOTIFICATION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
            .bind(&notification.id)
            .bind(&notification.tenant_id)
            .bind(&notification.user_id)
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(&notification.notification_type)
            .bind(notification.read)
            .bind(notification.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE tenant_id = ?1 AND user_id = ?2 AND (?3 = 0 OR read = 0) \
             ORDER BY created_at DESC LIMIT 100"
        ))
            .bind(tenant_id)
            .bind(user_id)
            .bind(unread_only)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_read(&self, tenant_id: &str, user_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = 1 WHERE id = ? AND tenant_id = ? AND user_id = ?",
        )
            .bind(id)
            .bind(tenant_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, tenant_id: &str, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = 1 WHERE tenant_id = ? AND user_id = ? AND read = 0",
        )
            .bind(tenant_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, tenant_id: &str, user_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE id = ? AND tenant_id = ? AND user_id = ?",
        )
            .bind(id)
            .bind(tenant_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
