use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{parse_id, StoreError, TurnoStore};
use crate::config::DatabaseConfig;
use crate::models::{NuevoTurno, Turno};

const COLLECTION: &str = "turnos";

/// BSON shape of a turno in the `turnos` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fecha: Option<bson::DateTime>,
    nombre_cliente: String,
    nombre_mascota: String,
    servicio: String,
}

impl From<TurnoDocument> for Turno {
    fn from(doc: TurnoDocument) -> Self {
        Self {
            id: doc.id,
            fecha: doc.fecha.map(|fecha| fecha.to_chrono()),
            nombre_cliente: doc.nombre_cliente,
            nombre_mascota: doc.nombre_mascota,
            servicio: doc.servicio,
        }
    }
}

#[derive(Clone)]
pub struct MongoTurnoStore {
    database: Database,
}

impl MongoTurnoStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        tracing::debug!("setting up mongo client");

        let client = Client::with_uri_str(&config.url).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        tracing::info!(database = %database.name(), "MongoDB client created");

        Ok(Self { database })
    }

    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<TurnoDocument> {
        self.database.collection(COLLECTION)
    }
}

#[async_trait]
impl TurnoStore for MongoTurnoStore {
    async fn list(&self) -> Result<Vec<Turno>, StoreError> {
        let cursor = self.collection().find(None, None).await?;
        let docs: Vec<TurnoDocument> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Turno::from).collect())
    }

    async fn create(&self, nuevo: NuevoTurno) -> Result<Turno, StoreError> {
        let doc = TurnoDocument {
            id: ObjectId::new(),
            fecha: nuevo.fecha.map(bson::DateTime::from_chrono),
            nombre_cliente: nuevo.nombre_cliente,
            nombre_mascota: nuevo.nombre_mascota,
            servicio: nuevo.servicio,
        };

        self.collection().insert_one(&doc, None).await?;

        Ok(doc.into())
    }

    async fn update_fecha(
        &self,
        id: &str,
        fecha: Option<DateTime<Utc>>,
    ) -> Result<Option<Turno>, StoreError> {
        let id = parse_id(id)?;
        let update = match fecha {
            Some(fecha) => doc! { "$set": { "fecha": bson::DateTime::from_chrono(fecha) } },
            None => doc! { "$unset": { "fecha": "" } },
        };

        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": id },
                update,
                FindOneAndUpdateOptions::builder()
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await?;

        Ok(updated.map(Turno::from))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;
        let result = self
            .collection()
            .delete_one(doc! { "_id": id }, None)
            .await?;

        if result.deleted_count == 0 {
            tracing::debug!(%id, "delete matched no turno");
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
