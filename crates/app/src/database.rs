//! Database connection management

use std::time::Duration;

use sqlx::{
    Error, PgPool, Postgres, Transaction,
    error::{DatabaseError, ErrorKind},
    migrate::MigrateError,
    postgres::PgPoolOptions,
    query,
};

use crate::retry::RetryPolicy;

const SET_READ_ONLY_SQL: &str = "SET TRANSACTION READ ONLY";

/// `SQLSTATE` raised when a serializable transaction cannot be ordered.
const SERIALIZATION_FAILURE: &str = "40001";

/// `SQLSTATE` raised when the deadlock detector aborts a transaction.
const DEADLOCK_DETECTED: &str = "40P01";

/// Connection pool sizing.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,

    /// How long a caller waits for a free connection before giving up.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Pool handle shared by every service, plus the policy used to re-run
/// transactions that lost a race.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    retry: RetryPolicy,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_retry_policy(pool, RetryPolicy::default())
    }

    #[must_use]
    pub fn with_retry_policy(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, Error> {
        self.pool.begin().await
    }

    /// Begin a transaction that rejects any write.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_read_only(&self) -> Result<Transaction<'static, Postgres>, Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_READ_ONLY_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL` with default pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, Error> {
    connect_with(database_url, PoolSettings::default()).await
}

/// Connect to `PostgreSQL` with explicit pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, settings: PoolSettings) -> Result<PgPool, Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply any pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Coarse classification of a storage error, shared by every service's
/// `From<sqlx::Error>` conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    /// A query expecting exactly one row found none.
    RowNotFound,

    /// A unique constraint rejected the write.
    UniqueViolation,

    /// A foreign key rejected the write.
    ForeignKeyViolation,

    /// A `NOT NULL` column was left empty.
    NotNullViolation,

    /// A `CHECK` constraint rejected the write.
    CheckViolation,

    /// Serialization failure or deadlock; the transaction can be re-run.
    Contention,

    /// The store could not be reached in time.
    Unavailable,

    /// Anything else.
    Other,
}

impl StoreFailure {
    #[must_use]
    pub fn classify(error: &Error) -> Self {
        match error {
            Error::RowNotFound => Self::RowNotFound,
            Error::PoolTimedOut | Error::PoolClosed | Error::Io(_) | Error::WorkerCrashed => {
                Self::Unavailable
            }
            Error::Database(database_error) => Self::classify_database(database_error.as_ref()),
            _ => Self::Other,
        }
    }

    fn classify_database(error: &dyn DatabaseError) -> Self {
        if matches!(
            error.code().as_deref(),
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
        ) {
            return Self::Contention;
        }

        match error.kind() {
            ErrorKind::UniqueViolation => Self::UniqueViolation,
            ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation,
            ErrorKind::NotNullViolation => Self::NotNullViolation,
            ErrorKind::CheckViolation => Self::CheckViolation,
            ErrorKind::Other | _ => Self::Other,
        }
    }
}
