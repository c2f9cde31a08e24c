//! # Forum service
//!
//! Validation and orchestration for forum CRUD. Deleting a forum removes
//! everything under it through the store's cascade rules.

use std::sync::Arc;

use tracing::info;

use domains::{DomainError, Forum, ForumRepo, NewForum, Result};

use crate::util::non_blank;

pub struct ForumService {
    forums: Arc<dyn ForumRepo>,
}

impl ForumService {
    pub fn new(forums: Arc<dyn ForumRepo>) -> Self {
        Self { forums }
    }

    pub async fn create(
        &self,
        name: &str,
        slug: Option<&str>,
        description: Option<&str>,
    ) -> Result<Forum> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "forum name must not be empty".to_string(),
            ));
        }

        let forum = self
            .forums
            .create(NewForum {
                name: name.to_string(),
                slug: non_blank(slug),
                description: non_blank(description),
            })
            .await?;
        info!("Created forum #{} '{}'", forum.id, forum.name);
        Ok(forum)
    }

    pub async fn list(&self) -> Result<Vec<Forum>> {
        self.forums.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Forum> {
        self.forums
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("forum", id))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let affected = self.forums.delete(id).await?;
        if affected == 0 {
            return Err(DomainError::not_found("forum", id));
        }
        info!("Deleted forum #{}", id);
        Ok(())
    }
}
