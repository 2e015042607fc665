use std::sync::Arc;

use crate::data::follow_repository::FollowRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, follow::Follow};
use tracing::instrument;
use uuid::Uuid;

const SELF_FOLLOW: &str = "You cannot follow yourself.";

#[derive(Clone)]
pub struct FollowService {
    follows: Arc<dyn FollowRepository>,
    users: Arc<dyn UserRepository>,
}

impl FollowService {
    pub fn new(follows: Arc<dyn FollowRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { follows, users }
    }

    /// Only the caller's own subscriptions are listed; `search` narrows by
    /// followed username, case-insensitively.
    pub async fn list(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Follow>, DomainError> {
        self.follows.list_for_user(user_id, search).await
    }

    /// Creates a subscription from `user_id` to the named user. The target
    /// must exist and differ from the caller; the duplicate-pair case is
    /// left to the repository's unique constraint so the check and the
    /// insert cannot race.
    #[instrument(skip(self))]
    pub async fn create(&self, user_id: Uuid, following: &str) -> Result<Follow, DomainError> {
        let target = self
            .users
            .find_by_username(following)
            .await?
            .ok_or_else(|| {
                DomainError::validation(
                    "following",
                    format!("Object with username={} does not exist.", following),
                )
            })?;

        if target.id == user_id {
            return Err(DomainError::validation("following", SELF_FOLLOW));
        }

        self.follows.create(user_id, target.id).await
    }
}
