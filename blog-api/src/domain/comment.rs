use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub post_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}
