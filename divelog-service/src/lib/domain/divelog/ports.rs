use async_trait::async_trait;

use crate::domain::divelog::errors::DiveLogError;
use crate::domain::divelog::models::DiveLog;
use crate::domain::divelog::models::DiveLogId;
use crate::domain::user::models::UserId;

/// Persistence operations for dive logs.
#[async_trait]
pub trait DiveLogRepository: Send + Sync + 'static {
    /// Persist a new dive log.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError>;

    /// Retrieve a dive log by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &DiveLogId) -> Result<Option<DiveLog>, DiveLogError>;

    /// Retrieve a user's dive logs, newest dive first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DiveLog>, DiveLogError>;

    /// Replace a stored dive log.
    ///
    /// # Errors
    /// * `NotFound` - Dive log does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError>;

    /// Remove a dive log.
    ///
    /// # Errors
    /// * `NotFound` - Dive log does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &DiveLogId) -> Result<(), DiveLogError>;
}
