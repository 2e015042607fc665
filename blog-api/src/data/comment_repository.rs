use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug)]
pub struct NewComment {
    pub author_id: Uuid,
    pub post_id: i64,
    pub text: String,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, new: NewComment) -> Result<Comment, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    async fn update(&self, comment: &Comment) -> Result<(), DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, new: NewComment) -> Result<Comment, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (author_id, post_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, author_id, post_id, text, created
            )
            SELECT i.id, i.author_id, u.username AS author_username,
                   i.post_id, i.text, i.created
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(new.author_id)
        .bind(new.post_id)
        .bind(&new.text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create comment: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(comment_id = %comment.id, post_id = %comment.post_id, "comment created");
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.author_id, u.username AS author_username,
                   c.post_id, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find comment {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query("UPDATE comments SET text = $1 WHERE id = $2")
            .bind(&comment.text)
            .bind(comment.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to update comment {}: {}", comment.id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        info!(comment_id = %comment.id, "comment updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete comment {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.author_id, u.username AS author_username,
                   c.post_id, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created, c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list comments for post {}: {}", post_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }
}
