use std::sync::Arc;

use crate::data::group_repository::GroupRepository;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::{error::DomainError, post::Post};
use tracing::instrument;

const BLANK_TEXT: &str = "This field may not be blank.";

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { posts, groups }
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list(None).await
    }

    /// One page of posts plus the total collection size for the pagination
    /// envelope.
    pub async fn page(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64), DomainError> {
        let posts = self.posts.list(Some((limit, offset))).await?;
        let count = self.posts.count().await?;
        Ok((posts, count))
    }

    #[instrument(skip(self, new))]
    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        self.validate(&new.text, new.group_id).await?;
        self.posts.create(new).await
    }

    /// Persists the writable fields of an already-merged post. The caller
    /// resolves the row and applies the author permission check first.
    #[instrument(skip(self, post))]
    pub async fn update(&self, post: Post) -> Result<Post, DomainError> {
        self.validate(&post.text, post.group_id).await?;
        self.posts.update(&post).await?;
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.posts.delete(id).await
    }

    async fn validate(&self, text: &str, group_id: Option<i64>) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", BLANK_TEXT));
        }
        if let Some(id) = group_id {
            if self.groups.find_by_id(id).await?.is_none() {
                return Err(DomainError::validation(
                    "group",
                    format!("Invalid pk \"{}\" - object does not exist.", id),
                ));
            }
        }
        Ok(())
    }
}
