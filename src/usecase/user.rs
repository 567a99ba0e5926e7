use std::sync::Arc;

use crate::auth::PasswordHasher;
use crate::error::AppResult;
use crate::models::{NewUser, RegisteredUser, UserInput};
use crate::repository::UserRepository;

/// Account registration.
pub struct UserUsecase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserUsecase {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Stores a new user with a hashed password. `input` must already be
    /// normalized and validated.
    pub async fn register(&self, input: UserInput) -> AppResult<RegisteredUser> {
        self.users.verify_available_email(&input.email).await?;

        let password_hash = self.hasher.hash(&input.password)?;
        let id = self
            .users
            .store(&NewUser {
                name: input.name,
                email: input.email.clone(),
                password_hash,
            })
            .await?;

        log::info!("registered user {}", id);
        Ok(RegisteredUser {
            id,
            email: input.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BcryptHasher;
    use crate::error::AppError;
    use crate::id::UuidGenerator;
    use crate::repository::MemoryStore;

    fn usecase() -> (Arc<MemoryStore>, UserUsecase) {
        let store = Arc::new(MemoryStore::new(Arc::new(UuidGenerator)));
        let usecase = UserUsecase::new(store.clone(), Arc::new(BcryptHasher::new(4)));
        (store, usecase)
    }

    fn input(email: &str) -> UserInput {
        UserInput {
            name: "Gopher".into(),
            email: email.into(),
            password: "secret_password".into(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (store, users) = usecase();
        let registered = users.register(input("gopher@go.dev")).await.unwrap();
        assert_eq!(registered.email, "gopher@go.dev");

        let stored = store.find_by_email("gopher@go.dev").await.unwrap().unwrap();
        assert_eq!(stored.id, registered.id);
        assert_ne!(stored.password_hash, "secret_password");
        assert!(BcryptHasher::new(4)
            .verify("secret_password", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let (_, users) = usecase();
        users.register(input("gopher@go.dev")).await.unwrap();

        let duplicate = users.register(input("gopher@go.dev")).await;
        assert!(matches!(duplicate, Err(AppError::EmailNotAvailable)));
    }
}
