use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::divelog::errors::DiveLogError;
use crate::domain::divelog::models::DiveLog;
use crate::domain::divelog::models::DiveLogId;
use crate::domain::divelog::ports::DiveLogRepository;
use crate::domain::user::models::UserId;

pub struct PostgresDiveLogRepository {
    pool: PgPool,
}

impl PostgresDiveLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<DiveLog, DiveLogError> {
    let get = |e: sqlx::Error| DiveLogError::DatabaseError(e.to_string());

    Ok(DiveLog {
        id: DiveLogId(row.try_get("id").map_err(get)?),
        user_id: UserId(row.try_get("user_id").map_err(get)?),
        title: row.try_get("title").map_err(get)?,
        date: row.try_get("date").map_err(get)?,
        depth_meters: row.try_get("depth_meters").map_err(get)?,
        location: row.try_get("location").map_err(get)?,
        notes: row.try_get("notes").map_err(get)?,
        created_at: row.try_get("created_at").map_err(get)?,
    })
}

#[async_trait]
impl DiveLogRepository for PostgresDiveLogRepository {
    async fn create(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError> {
        sqlx::query(
            r#"
            INSERT INTO dive_logs
                (id, user_id, title, date, depth_meters, location, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(dive_log.id.0)
        .bind(dive_log.user_id.0)
        .bind(&dive_log.title)
        .bind(dive_log.date)
        .bind(dive_log.depth_meters)
        .bind(dive_log.location.as_deref())
        .bind(dive_log.notes.as_deref())
        .bind(dive_log.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DiveLogError::DatabaseError(e.to_string()))?;

        Ok(dive_log)
    }

    async fn find_by_id(&self, id: &DiveLogId) -> Result<Option<DiveLog>, DiveLogError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, date, depth_meters, location, notes, created_at
            FROM dive_logs
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DiveLogError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DiveLog>, DiveLogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, date, depth_meters, location, notes, created_at
            FROM dive_logs
            WHERE user_id = $1
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DiveLogError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError> {
        let result = sqlx::query(
            r#"
            UPDATE dive_logs
            SET title = $2, date = $3, depth_meters = $4, location = $5, notes = $6
            WHERE id = $1
            "#,
        )
        .bind(dive_log.id.0)
        .bind(&dive_log.title)
        .bind(dive_log.date)
        .bind(dive_log.depth_meters)
        .bind(dive_log.location.as_deref())
        .bind(dive_log.notes.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| DiveLogError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DiveLogError::NotFound(dive_log.id.to_string()));
        }

        Ok(dive_log)
    }

    async fn delete(&self, id: &DiveLogId) -> Result<(), DiveLogError> {
        let result = sqlx::query("DELETE FROM dive_logs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| DiveLogError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DiveLogError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
