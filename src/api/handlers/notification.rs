use axum::{
    extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = user.tenant_scope()?;

    let notifications = state
        .notification_repo
        .list_for_user(tenant_id, &user.id, query.unread_only)
        .await?;
    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = user.tenant_scope()?;

    if !state.notification_repo.mark_read(tenant_id, &user.id, &notification_id).await? {
        return Err(AppError::NotFound("Notification not found".into()));
    }
    Ok(Json(serde_json::json!({ "message": "Notification marked as read" })))
}

pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = user.tenant_scope()?;

    state.notification_repo.mark_all_read(tenant_id, &user.id).await?;
    Ok(Json(serde_json::json!({ "message": "All notifications marked as read" })))
}

pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = user.tenant_scope()?;

    if !state.notification_repo.delete(tenant_id, &user.id, &notification_id).await? {
        return Err(AppError::NotFound("Notification not found".into()));
    }
    Ok(Json(serde_json::json!({ "message": "Notification deleted" })))
}

#[derive(Deserialize)]
pub struct WsQuery {
    pub token: String,
}

async fn close_with_policy_violation(mut socket: WebSocket) {
    let _ = socket
        .send(Message::Close(Some(CloseFrame {
            code: close_code::POLICY,
            reason: "Authentication failed".into(),
        })))
        .await;
}

/// Upgrade handler for the live notification channel. The token is verified
/// before the connection is registered; a bad token still upgrades, then
/// closes immediately with a policy-violation code instead of an HTTP error.
pub async fn notifications_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (user_id, tenant_id) = match authenticate(&state, &query.token).await {
        Ok(identity) => identity,
        Err(_) => {
            warn!("Notification WebSocket rejected: authentication failed");
            return ws.on_upgrade(close_with_policy_violation);
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id, tenant_id))
}

async fn authenticate(state: &Arc<AppState>, token: &str) -> Result<(String, String), AppError> {
    let user_id = state.token_service.resolve(token)?;
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    // Notifications are tenant-scoped; a connection without a tenant has
    // nothing to subscribe to.
    let tenant_id = user.tenant_scope()?.to_string();
    Ok((user.id, tenant_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: String, tenant_id: String) {
    let connection_id = Uuid::new_v4().to_string();
    let mut receiver = state.registry.connect(&tenant_id, &user_id, &connection_id).await;

    debug!(%user_id, %tenant_id, %connection_id, "notification channel open");

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if text.as_str() == "ping"
                            && sink.send(Message::Text("pong".into())).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            payload = receiver.recv() => {
                match payload {
                    Some(value) => {
                        if sink.send(Message::Text(value.to_string().into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    state.registry.disconnect(&tenant_id, &user_id, &connection_id).await;
    debug!(%user_id, %tenant_id, %connection_id, "notification channel closed");
}
