use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Teacher {
    pub id: String,
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subjects: Json<Vec<String>>,
    pub qualification: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(
        tenant_id: String,
        first_name: String,
        last_name: String,
        email: String,
        subjects: Vec<String>,
        qualification: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            first_name,
            last_name,
            email,
            subjects: Json(subjects),
            qualification,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
