//! # User service
//!
//! Users are a standalone management surface; nothing in the forum flow
//! references them. Email and username are unique at the schema level,
//! so conflicts come back from the store as persistence failures.

use std::sync::Arc;

use tracing::info;

use uuid::Uuid;

use domains::{DomainError, NewUser, Result, User, UserRepo};

pub struct UserService {
    users: Arc<dyn UserRepo>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    pub async fn create(&self, email: &str, username: &str) -> Result<User> {
        let email = email.trim();
        let username = username.trim();
        if email.is_empty() {
            return Err(DomainError::Validation(
                "email must not be empty".to_string(),
            ));
        }
        if username.is_empty() {
            return Err(DomainError::Validation(
                "username must not be empty".to_string(),
            ));
        }

        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                username: username.to_string(),
            })
            .await?;
        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let affected = self.users.delete(id).await?;
        if affected == 0 {
            return Err(DomainError::not_found("user", id));
        }
        info!("Deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::MockUserRepo;
    use mockall::predicate::eq;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn create_trims_fields() {
        let mut repo = MockUserRepo::new();
        repo.expect_create()
            .withf(|new| new.email == "ada@example.org" && new.username == "ada")
            .returning(|new| {
                let now = Utc::now();
                Ok(User {
                    id: Uuid::new_v4(),
                    email: new.email,
                    username: new.username,
                    created_at: now,
                    updated_at: now,
                })
            });

        let service = UserService::new(Arc::new(repo));
        let user = assert_ok!(service.create(" ada@example.org ", " ada ").await);
        assert_eq!(user.username, "ada");
    }

    #[tokio::test]
    async fn create_rejects_blank_email_or_username() {
        let service = UserService::new(Arc::new(MockUserRepo::new()));
        assert!(matches!(
            service.create("  ", "ada").await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            service.create("ada@example.org", "").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn delete_of_missing_user_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepo::new();
        repo.expect_delete().with(eq(id)).returning(|_| Ok(0));

        let service = UserService::new(Arc::new(repo));
        assert!(service.delete(id).await.unwrap_err().is_not_found());
    }
}
