use crate::domain::error::DomainError;
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Writable fields of a post at creation time. The id and `pub_date` are
/// assigned by the database.
#[derive(Debug)]
pub struct NewPost {
    pub author_id: Uuid,
    pub text: String,
    pub image: Option<String>,
    pub group_id: Option<i64>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update(&self, post: &Post) -> Result<(), DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    /// `page` is (limit, offset); `None` returns the whole collection.
    /// Ordered by id so consecutive pages are disjoint.
    async fn list(&self, page: Option<(i64, i64)>) -> Result<Vec<Post>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (author_id, text, image, group_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, author_id, text, pub_date, image, group_id
            )
            SELECT i.id, i.author_id, u.username AS author_username,
                   i.text, i.pub_date, i.image, i.group_id
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(new.author_id)
        .bind(&new.text)
        .bind(&new.image)
        .bind(new.group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.author_id, u.username AS author_username,
                   p.text, p.pub_date, p.image, p.group_id
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find post {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE posts
            SET text = $1, image = $2, group_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&post.text)
        .bind(&post.image)
        .bind(post.group_id)
        .bind(post.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", post.id, e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, "post updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        info!(post_id = %id, "post deleted");
        Ok(())
    }

    async fn list(&self, page: Option<(i64, i64)>) -> Result<Vec<Post>, DomainError> {
        let result = match page {
            Some((limit, offset)) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT p.id, p.author_id, u.username AS author_username,
                           p.text, p.pub_date, p.image, p.group_id
                    FROM posts p
                    JOIN users u ON u.id = p.author_id
                    ORDER BY p.id
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT p.id, p.author_id, u.username AS author_username,
                           p.text, p.pub_date, p.image, p.group_id
                    FROM posts p
                    JOIN users u ON u.id = p.author_id
                    ORDER BY p.id
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        };

        result.map_err(|e| {
            error!("failed to list posts: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to count posts: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            })
    }
}
