use crate::domain::error::DomainError;
use crate::domain::group::Group;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, DomainError>;
    async fn list(&self) -> Result<Vec<Group>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, DomainError> {
        sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find group {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list groups: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }
}
