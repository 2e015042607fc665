use serde::Serialize;

/// A publication topic. Groups are read-only through the API and referenced,
/// never owned, by posts: deleting a group clears the reference on its posts.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
