use std::sync::Arc;

use crate::data::group_repository::GroupRepository;
use crate::domain::{error::DomainError, group::Group};

#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn get(&self, id: i64) -> Result<Group, DomainError> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or(DomainError::GroupNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Group>, DomainError> {
        self.groups.list().await
    }
}
