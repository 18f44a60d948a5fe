use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: Some(password_hash),
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id, false)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_password(
        &self,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(UserError::InvalidArgument(
                "Senha atual e nova senha são obrigatórias".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_id(id, true)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let stored_hash = user
            .password_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .ok_or(UserError::MissingCredential)?;

        let matches = match self.password_hasher.verify(current_password, stored_hash) {
            Ok(matches) => matches,
            Err(auth::PasswordError::MissingHash) => return Err(UserError::MissingCredential),
            Err(e) => return Err(UserError::Password(e)),
        };
        if !matches {
            tracing::info!(user_id = %id, "Password update rejected: current password mismatch");
            return Err(UserError::CurrentPasswordMismatch);
        }

        let new_hash = self.password_hasher.hash(new_password)?;
        self.repository.update_credential(id, &new_hash).await
    }
}
