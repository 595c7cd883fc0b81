use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Student {
    pub id: String,
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: String,
    pub date_of_birth: String,
    pub parent_email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// tenant_id always comes from the caller's identity, never the payload.
    pub fn new(
        tenant_id: String,
        first_name: String,
        last_name: String,
        email: String,
        grade: String,
        date_of_birth: String,
        parent_email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            first_name,
            last_name,
            email,
            grade,
            date_of_birth,
            parent_email,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
