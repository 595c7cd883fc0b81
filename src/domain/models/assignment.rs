use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Assignment {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub subject: String,
    pub teacher_id: String,
    pub grade: String,
    pub max_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: String,
        title: String,
        description: String,
        due_date: String,
        subject: String,
        teacher_id: String,
        grade: String,
        max_score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            title,
            description,
            due_date,
            subject,
            teacher_id,
            grade,
            max_score,
            created_at: Utc::now(),
        }
    }
}
