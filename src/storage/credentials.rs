//! Credential persistence: user identities and password hashes.

use std::str::FromStr;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::info;
use utoipa::ToSchema;

use crate::crypto::password::PasswordHasher;
use crate::error::Error;

/// An authenticated user identity, as returned by `authenticate`.
///
/// Carries no password material and no session token; session handling, if
/// any, belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Owns the `users` table. No other component mutates credentials.
pub struct CredentialStore {
    pool: SqlitePool,
    hasher: PasswordHasher,
}

impl CredentialStore {
    /// Connects and creates the schema.
    ///
    /// Username and email uniqueness is a database constraint: concurrent
    /// registrations race on the INSERT and the loser's constraint violation
    /// is classified below, rather than trusting a check-then-write.
    pub async fn connect(database_url: &str, hasher: PasswordHasher) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool, hasher })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Registers a new user and returns the assigned identifier.
    ///
    /// The raw password is hashed before it touches the database and is
    /// never stored or logged in clear form.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<i64, Error> {
        let password_hash = self.hasher.hash(raw_password)?;
        let result =
            sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(&password_hash)
                .execute(&self.pool)
                .await;

        match result {
            Ok(done) => {
                info!(username, "user registered");
                Ok(done.last_insert_rowid())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(Error::DuplicateIdentity)
            }
            Err(e) => Err(Error::Store(e)),
        }
    }

    /// Checks a login attempt.
    ///
    /// An unknown email and a wrong password both come back as
    /// [`Error::InvalidCredentials`]; the two cases are deliberately not
    /// distinguishable from the error value (account-enumeration
    /// resistance).
    pub async fn authenticate(
        &self,
        email: &str,
        raw_password: &str,
    ) -> Result<AuthenticatedUser, Error> {
        let row =
            sqlx::query("SELECT id, username, email, password_hash FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Err(Error::InvalidCredentials);
        };

        let password_hash: String = row.try_get("password_hash")?;
        if !self.hasher.verify(raw_password, &password_hash) {
            return Err(Error::InvalidCredentials);
        }

        Ok(AuthenticatedUser {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
        })
    }
}
