use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// One live duplex session. The sender side lives in the registry; the
/// receiver side is held by the WebSocket task that owns the socket.
struct ConnectionHandle {
    connection_id: String,
    sender: mpsc::UnboundedSender<Value>,
}

type ConnectionKey = (String, String); // (tenant_id, user_id)

/// In-memory map of live notification channels, keyed by (tenant, user).
/// One user may hold several concurrent connections (multiple tabs). Nothing
/// here is persisted; a restart simply drops every entry and clients
/// reconnect. Delivery is at-most-once: a send to a closed channel is
/// swallowed, never retried.
pub struct ConnectionRegistry {
    connections: Arc<RwLock<HashMap<ConnectionKey, Vec<ConnectionHandle>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a connection and returns the receiver the socket task
    /// drains. `connection_id` must be unique per connection so that
    /// disconnect removes exactly one entry.
    pub async fn connect(
        &self,
        tenant_id: &str,
        user_id: &str,
        connection_id: &str,
    ) -> mpsc::UnboundedReceiver<Value> {
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut connections = self.connections.write().await;
        connections
            .entry((tenant_id.to_string(), user_id.to_string()))
            .or_default()
            .push(ConnectionHandle {
                connection_id: connection_id.to_string(),
                sender,
            });

        debug!(tenant_id, user_id, connection_id, "connection registered");
        receiver
    }

    /// Removes exactly the given connection. The key is dropped once its
    /// last connection goes away, so the map never grows unboundedly.
    pub async fn disconnect(&self, tenant_id: &str, user_id: &str, connection_id: &str) {
        let mut connections = self.connections.write().await;
        let key = (tenant_id.to_string(), user_id.to_string());

        if let Some(handles) = connections.get_mut(&key) {
            handles.retain(|h| h.connection_id != connection_id);
            if handles.is_empty() {
                connections.remove(&key);
            }
        }

        debug!(tenant_id, user_id, connection_id, "connection removed");
    }

    /// Best-effort push to every live connection of one user. A dead
    /// connection is skipped; it never blocks delivery to the others.
    pub async fn send_to_user(&self, payload: &Value, user_id: &str, tenant_id: &str) -> usize {
        let connections = self.connections.read().await;
        let key = (tenant_id.to_string(), user_id.to_string());

        let mut delivered = 0;
        if let Some(handles) = connections.get(&key) {
            for handle in handles {
                if handle.sender.send(payload.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Best-effort push to every connection whose key belongs to the tenant.
    pub async fn broadcast_to_tenant(&self, payload: &Value, tenant_id: &str) -> usize {
        let connections = self.connections.read().await;

        let mut delivered = 0;
        for ((tenant, _), handles) in connections.iter() {
            if tenant == tenant_id {
                for handle in handles {
                    if handle.sender.send(payload.clone()).is_ok() {
                        delivered += 1;
                    }
                }
            }
        }
        delivered
    }

    pub async fn is_online(&self, tenant_id: &str, user_id: &str) -> bool {
        let connections = self.connections.read().await;
        connections
            .get(&(tenant_id.to_string(), user_id.to_string()))
            .is_some_and(|handles| !handles.is_empty())
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.values().map(Vec::len).sum()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
