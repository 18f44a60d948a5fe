use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// The credential column is selected only when explicitly requested; default
// paths get NULL back so the hash never leaves the store by accident.
const COLUMNS_WITH_CREDENTIAL: &str =
    "id, email, password_hash, first_name, last_name, created_at";
const COLUMNS_WITHOUT_CREDENTIAL: &str =
    "id, email, NULL::text AS password_hash, first_name, last_name, created_at";

fn map_row(row: &PgRow) -> Result<User, UserError> {
    let email: String = row
        .try_get("email")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

    Ok(User {
        id: UserId(
            row.try_get("id")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        ),
        email: EmailAddress::new(email)?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        first_name: row
            .try_get("first_name")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        last_name: row
            .try_get("last_name")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_deref())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
        include_credential: bool,
    ) -> Result<Option<User>, UserError> {
        let columns = if include_credential {
            COLUMNS_WITH_CREDENTIAL
        } else {
            COLUMNS_WITHOUT_CREDENTIAL
        };

        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", columns))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        include_credential: bool,
    ) -> Result<Option<User>, UserError> {
        let columns = if include_credential {
            COLUMNS_WITH_CREDENTIAL
        } else {
            COLUMNS_WITHOUT_CREDENTIAL
        };

        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", columns))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn update_credential(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
