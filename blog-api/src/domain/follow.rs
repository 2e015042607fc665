use uuid::Uuid;

/// A directed subscription edge. The (user, following) pair is unique at the
/// database level; duplicate inserts surface as validation errors.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: Uuid,
    pub user_username: String,
    pub following_id: Uuid,
    pub following_username: String,
}
