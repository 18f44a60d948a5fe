use std::sync::Arc;

use chrono::Utc;

use crate::domain::divelog::errors::DiveLogError;
use crate::domain::divelog::models::CreateDiveLogCommand;
use crate::domain::divelog::models::DiveLog;
use crate::domain::divelog::models::DiveLogId;
use crate::domain::divelog::models::UpdateDiveLogCommand;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::UserId;

/// Domain service for dive log operations.
///
/// Ownership is enforced here: reads and deletes check that the log belongs
/// to the resolved caller before touching it.
pub struct DiveLogService<DR>
where
    DR: DiveLogRepository,
{
    repository: Arc<DR>,
}

impl<DR> DiveLogService<DR>
where
    DR: DiveLogRepository,
{
    pub fn new(repository: Arc<DR>) -> Self {
        Self { repository }
    }

    pub async fn create_dive_log(
        &self,
        user_id: UserId,
        command: CreateDiveLogCommand,
    ) -> Result<DiveLog, DiveLogError> {
        let dive_log = DiveLog {
            id: DiveLogId::new(),
            user_id,
            title: command.title,
            date: command.date,
            depth_meters: command.depth_meters,
            location: command.location,
            notes: command.notes,
            created_at: Utc::now(),
        };

        self.repository.create(dive_log).await
    }

    pub async fn get_dive_log(
        &self,
        id: &DiveLogId,
        caller: &UserId,
    ) -> Result<DiveLog, DiveLogError> {
        let dive_log = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DiveLogError::NotFound(id.to_string()))?;

        if dive_log.user_id != *caller {
            return Err(DiveLogError::Forbidden);
        }

        Ok(dive_log)
    }

    pub async fn list_dive_logs(&self, user_id: &UserId) -> Result<Vec<DiveLog>, DiveLogError> {
        self.repository.find_by_user(user_id).await
    }

    pub async fn update_dive_log(
        &self,
        id: &DiveLogId,
        caller: &UserId,
        command: UpdateDiveLogCommand,
    ) -> Result<DiveLog, DiveLogError> {
        // Ownership check first; owner and created_at survive the replace
        let existing = self.get_dive_log(id, caller).await?;

        let dive_log = DiveLog {
            id: existing.id,
            user_id: existing.user_id,
            title: command.title,
            date: command.date,
            depth_meters: command.depth_meters,
            location: command.location,
            notes: command.notes,
            created_at: existing.created_at,
        };

        self.repository.update(dive_log).await
    }

    pub async fn delete_dive_log(
        &self,
        id: &DiveLogId,
        caller: &UserId,
    ) -> Result<(), DiveLogError> {
        // Ownership check before the destructive call
        self.get_dive_log(id, caller).await?;
        self.repository.delete(id).await
    }
}
