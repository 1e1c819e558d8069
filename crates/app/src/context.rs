//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    clock::QueueClock,
    database::{self, Db, PoolSettings},
    domain::{
        analytics::{AnalyticsService, PgAnalyticsService},
        devices::{DevicesService, PgDevicesService},
        serving::{PgServingService, ServingService},
        tenants::{PgTenantsService, TenantsService},
        tickets::{PgTicketsService, TicketsService},
    },
    retry::RetryPolicy,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// Everything needed to build the service set.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub pool: PoolSettings,
    pub retry: RetryPolicy,
    pub clock: QueueClock,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub tickets: Arc<dyn TicketsService>,
    pub serving: Arc<dyn ServingService>,
    pub devices: Arc<dyn DevicesService>,
    pub analytics: Arc<dyn AnalyticsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect, optionally migrate, and wire up every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or a migration fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&settings.database_url, settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(
            Db::with_retry_policy(pool, settings.retry),
            settings.clock,
        ))
    }

    #[must_use]
    pub fn from_db(db: Db, clock: QueueClock) -> Self {
        Self {
            tenants: Arc::new(PgTenantsService::new(db.clone())),
            tickets: Arc::new(PgTicketsService::new(db.clone(), clock.clone())),
            serving: Arc::new(PgServingService::new(db.clone(), clock.clone())),
            devices: Arc::new(PgDevicesService::new(db.clone())),
            analytics: Arc::new(PgAnalyticsService::new(db.clone(), clock)),
            auth: Arc::new(PgAuthService::new(db)),
        }
    }
}
