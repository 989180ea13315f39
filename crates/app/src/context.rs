//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{
            service::{CartsService, DefaultCartsService},
            store::PgCartStore,
        },
        catalog::PgProductCatalog,
        sequences::PgSequenceCounter,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Connects, applies pending schema migrations, and wires the
    /// Postgres-backed collaborators into the cart service.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection or a migration fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::run_migrations(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire the service graph over an existing database handle.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let store = Arc::new(PgCartStore::new(db.clone()));
        let catalog = Arc::new(PgProductCatalog::new(db.clone()));
        let sequences = Arc::new(PgSequenceCounter::new(db));

        Self {
            carts: Arc::new(DefaultCartsService::new(store, catalog, sequences)),
        }
    }
}
