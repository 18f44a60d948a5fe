use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with a hashed credential.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier, credential excluded.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Replace a user's credential after verifying the current one.
    ///
    /// # Errors
    /// * `InvalidArgument` - Current or new password is empty
    /// * `NotFound` - User does not exist
    /// * `MissingCredential` - Account has no stored hash to verify against
    /// * `CurrentPasswordMismatch` - Current password is wrong
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate (the credential store).
///
/// Lookups are idempotent reads with no hidden side effects. The stored
/// credential hash is excluded unless `include_credential` is set.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness is enforced at the store level
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Arguments
    /// * `email` - Already-normalized email (trim + lowercase)
    /// * `include_credential` - Whether the stored hash is wanted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        include_credential: bool,
    ) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    /// * `include_credential` - Whether the stored hash is wanted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(
        &self,
        id: &UserId,
        include_credential: bool,
    ) -> Result<Option<User>, UserError>;

    /// Replace the stored credential hash for a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_credential(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
}
