use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendance {
    pub id: String,
    pub tenant_id: String,
    pub student_id: String,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attendance {
    pub fn new(
        tenant_id: String,
        student_id: String,
        date: String,
        status: String,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            student_id,
            date,
            status,
            notes,
            created_at: Utc::now(),
        }
    }
}
