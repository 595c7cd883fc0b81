use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Grade {
    pub id: String,
    pub tenant_id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub score: f64,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Grade {
    pub fn new(
        tenant_id: String,
        assignment_id: String,
        student_id: String,
        score: f64,
        feedback: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            assignment_id,
            student_id,
            score,
            feedback,
            created_at: Utc::now(),
        }
    }
}
