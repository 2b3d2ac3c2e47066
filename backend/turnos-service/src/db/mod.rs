mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::config::{Config, StoreBackend};
use crate::models::{NuevoTurno, Turno};

pub use memory::InMemoryTurnoStore;
pub use mongo::MongoTurnoStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid turno id: {0:?}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Persistence for turnos. Identifiers arrive as the hex strings clients send.
#[async_trait]
pub trait TurnoStore: Send + Sync {
    /// Every stored turno in insertion order.
    async fn list(&self) -> Result<Vec<Turno>, StoreError>;

    async fn create(&self, nuevo: NuevoTurno) -> Result<Turno, StoreError>;

    /// Replaces the date of a turno, or clears it when `fecha` is `None`.
    /// Returns `Ok(None)` when no turno has that id.
    async fn update_fecha(
        &self,
        id: &str,
        fecha: Option<DateTime<Utc>>,
    ) -> Result<Option<Turno>, StoreError>;

    /// Succeeds whether or not a turno matched.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Builds the configured store and checks it is reachable.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn TurnoStore>> {
    let store: Arc<dyn TurnoStore> = match config.store.backend {
        StoreBackend::Mongo => Arc::new(MongoTurnoStore::connect(&config.database).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory turno store, data will not survive a restart");
            Arc::new(InMemoryTurnoStore::new())
        }
    };

    store.ping().await?;
    tracing::info!(backend = ?config.store.backend, "Turno store is reachable");

    Ok(store)
}
