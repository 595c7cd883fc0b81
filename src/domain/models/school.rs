use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct School {
    pub id: String,
    /// Isolation key for every other entity of this school. Generated here,
    /// never reused, immutable after creation.
    pub tenant_id: String,
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl School {
    pub fn new(name: String, address: String, contact_email: String, contact_phone: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: Uuid::new_v4().to_string(),
            name,
            address,
            contact_email,
            contact_phone,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
