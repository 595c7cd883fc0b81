use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimetableEntry {
    pub id: String,
    pub tenant_id: String,
    pub grade: String,
    pub day: String,
    pub period: i64,
    pub subject: String,
    pub teacher_id: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

impl TimetableEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: String,
        grade: String,
        day: String,
        period: i64,
        subject: String,
        teacher_id: String,
        start_time: String,
        end_time: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            grade,
            day,
            period,
            subject,
            teacher_id,
            start_time,
            end_time,
            created_at: Utc::now(),
        }
    }
}
