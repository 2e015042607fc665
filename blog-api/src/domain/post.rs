use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A blog post. `author_username` is carried alongside the id so responses
/// can render the author by name without a second lookup.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub group_id: Option<i64>,
}
