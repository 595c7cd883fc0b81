use std::sync::Arc;

use crate::domain::models::notification::Notification;
use crate::domain::ports::{NotificationRepository, UserRepository};
use crate::domain::services::connection_registry::ConnectionRegistry;
use crate::error::AppError;
use tracing::{debug, warn};

/// Persists notifications and pushes them to live connections. The stored
/// row is the source of truth; the push is a best-effort accelerator and its
/// failure never fails the triggering operation.
pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
    registry: Arc<ConnectionRegistry>,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        user_repo: Arc<dyn UserRepository>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
            registry,
        }
    }

    pub async fn notify(
        &self,
        title: &str,
        message: &str,
        notification_type: &str,
        user_id: &str,
        tenant_id: &str,
    ) -> Result<Notification, AppError> {
        let notification = Notification::new(
            tenant_id.to_string(),
            user_id.to_string(),
            title.to_string(),
            message.to_string(),
            notification_type.to_string(),
        );
        let created = self.notification_repo.create(&notification).await?;

        match serde_json::to_value(&created) {
            Ok(payload) => {
                let delivered = self.registry.send_to_user(&payload, user_id, tenant_id).await;
                debug!(user_id, tenant_id, delivered, "notification pushed");
            }
            Err(e) => warn!("failed to serialize notification payload: {}", e),
        }

        Ok(created)
    }

    /// Notifies every user in the tenant except `exclude_user_id`. Linear in
    /// tenant size, which is fine at this system's scale.
    pub async fn broadcast(
        &self,
        title: &str,
        message: &str,
        notification_type: &str,
        tenant_id: &str,
        exclude_user_id: Option<&str>,
    ) -> Result<usize, AppError> {
        let users = self.user_repo.list_by_tenant(tenant_id).await?;

        let mut notified = 0;
        for user in users {
            if exclude_user_id.is_some_and(|excluded| excluded == user.id) {
                continue;
            }
            self.notify(title, message, notification_type, &user.id, tenant_id)
                .await?;
            notified += 1;
        }

        Ok(notified)
    }
}
