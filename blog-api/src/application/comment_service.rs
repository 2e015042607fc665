use std::sync::Arc;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::{comment::Comment, error::DomainError, post::Post};
use tracing::instrument;
use uuid::Uuid;

const BLANK_TEXT: &str = "This field may not be blank.";

/// Comments are always addressed through their parent post: every operation
/// resolves the post first, and a comment id under the wrong post is a miss.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    async fn parent(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))
    }

    pub async fn list(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let post = self.parent(post_id).await?;
        self.comments.list_for_post(post.id).await
    }

    pub async fn get(&self, post_id: i64, id: i64) -> Result<Comment, DomainError> {
        self.parent(post_id).await?;
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CommentNotFound(id))?;
        if comment.post_id != post_id {
            return Err(DomainError::CommentNotFound(id));
        }
        Ok(comment)
    }

    #[instrument(skip(self, text))]
    pub async fn create(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        let post = self.parent(post_id).await?;
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", BLANK_TEXT));
        }
        self.comments
            .create(NewComment {
                author_id,
                post_id: post.id,
                text,
            })
            .await
    }

    #[instrument(skip(self, comment))]
    pub async fn update(&self, comment: Comment) -> Result<Comment, DomainError> {
        if comment.text.trim().is_empty() {
            return Err(DomainError::validation("text", BLANK_TEXT));
        }
        self.comments.update(&comment).await?;
        Ok(comment)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.comments.delete(id).await
    }
}
