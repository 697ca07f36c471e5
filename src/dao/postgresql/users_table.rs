use anyhow::Context;
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use crate::domain::dto::{NewUser, UserDto};
use crate::domain::po::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// List every user, smallest id first.
///
/// A row that fails to decode is logged and dropped; it never aborts the
/// whole listing.
pub async fn list_users(db_pool: &PgPool) -> Result<Vec<UserDto>, StoreError> {
    let rows = sqlx::query(
        r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY id
        ;"#,
    )
    .fetch_all(db_pool)
    .await?;

    let mut users = Vec::with_capacity(rows.len());
    for row in &rows {
        match User::from_row(row) {
            Ok(user) => users.push(UserDto::from(user)),
            Err(e) => tracing::error!(error = %e, "Skipping user row that failed to decode"),
        }
    }
    Ok(users)
}

/// Uniqueness pre-check used before insertion.
pub async fn find_user_by_email(email: &str, db_pool: &PgPool) -> Result<Option<i32>, StoreError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
            SELECT id
            FROM users
            WHERE email = $1
        ;"#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;
    Ok(id)
}

/// Insert a user and return the store-assigned id and timestamp.
///
/// The pre-check in [`find_user_by_email`] and this insert are not atomic;
/// two concurrent creations can both pass the pre-check, so the unique
/// constraint on `email` is the backstop and surfaces as `DuplicateEmail`.
pub async fn insert_user(new_user: &NewUser, db_pool: &PgPool) -> Result<UserDto, StoreError> {
    let rec = sqlx::query_as::<_, User>(
        r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
        ;"#,
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .fetch_one(db_pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(e),
    })?;
    Ok(UserDto::from(rec))
}

/// Create the users table if absent and seed it when empty.
///
/// Idempotent: repeated calls never duplicate the seed rows.
pub async fn ensure_schema(db_pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) UNIQUE NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );"#,
    )
    .execute(db_pool)
    .await
    .context("Failed to create users table")?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await
        .context("Failed to count users")?;

    if count == 0 {
        sqlx::query(
            r#"
            INSERT INTO users (name, email) VALUES
                ('John Doe', 'john@example.com'),
                ('Jane Smith', 'jane@example.com'),
                ('Bob Johnson', 'bob@example.com')
            ON CONFLICT (email) DO NOTHING
        ;"#,
        )
        .execute(db_pool)
        .await
        .context("Failed to insert seed users")?;
        tracing::info!("Seed users inserted");
    }

    Ok(())
}
