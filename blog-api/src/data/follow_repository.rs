use crate::domain::error::DomainError;
use crate::domain::follow::Follow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

pub const ALREADY_FOLLOWING: &str = "You are already following this user.";

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Inserts the edge, relying on the unique (user, following) constraint
    /// so concurrent duplicate requests cannot both succeed.
    async fn create(&self, user_id: Uuid, following_id: Uuid) -> Result<Follow, DomainError>;
    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Follow>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create(&self, user_id: Uuid, following_id: Uuid) -> Result<Follow, DomainError> {
        let follow = sqlx::query_as::<_, Follow>(
            r#"
            WITH inserted AS (
                INSERT INTO follows (user_id, following_id)
                VALUES ($1, $2)
                RETURNING id, user_id, following_id
            )
            SELECT i.id, i.user_id, u.username AS user_username,
                   i.following_id, f.username AS following_username
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            JOIN users f ON f.id = i.following_id
            "#,
        )
        .bind(user_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .map(|c| c.contains("follows_user_following"))
                == Some(true)
            {
                DomainError::validation("non_field_errors", ALREADY_FOLLOWING)
            } else {
                error!("failed to create follow: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(user_id = %user_id, following_id = %following_id, "follow created");
        Ok(follow)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Follow>, DomainError> {
        sqlx::query_as::<_, Follow>(
            r#"
            SELECT fl.id, fl.user_id, u.username AS user_username,
                   fl.following_id, f.username AS following_username
            FROM follows fl
            JOIN users u ON u.id = fl.user_id
            JOIN users f ON f.id = fl.following_id
            WHERE fl.user_id = $1
              AND ($2::text IS NULL OR f.username ILIKE '%' || $2 || '%')
            ORDER BY fl.id
            "#,
        )
        .bind(user_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list follows for {}: {}", user_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }
}
