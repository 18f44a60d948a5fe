use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::divelog::errors::DiveLogIdError;
use crate::domain::user::models::UserId;

/// Dive log entry, owned by exactly one user.
#[derive(Debug, Clone)]
pub struct DiveLog {
    pub id: DiveLogId,
    pub user_id: UserId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub depth_meters: f64,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Dive log unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiveLogId(pub Uuid);

impl DiveLogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a dive log ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, DiveLogIdError> {
        Uuid::parse_str(s)
            .map(DiveLogId)
            .map_err(|e| DiveLogIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for DiveLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiveLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to record a new dive for the resolved caller.
#[derive(Debug)]
pub struct CreateDiveLogCommand {
    pub title: String,
    pub date: DateTime<Utc>,
    pub depth_meters: f64,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Command to replace the mutable fields of an existing dive log.
///
/// Owner and creation instant never change.
#[derive(Debug)]
pub struct UpdateDiveLogCommand {
    pub title: String,
    pub date: DateTime<Utc>,
    pub depth_meters: f64,
    pub location: Option<String>,
    pub notes: Option<String>,
}
