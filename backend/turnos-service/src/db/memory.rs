use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{parse_id, StoreError, TurnoStore};
use crate::models::{NuevoTurno, Turno};

/// Process-local store with the same id and ordering semantics as the
/// MongoDB collection.
#[derive(Debug, Default)]
pub struct InMemoryTurnoStore {
    turnos: RwLock<Vec<Turno>>,
}

impl InMemoryTurnoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.turnos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turnos.read().await.is_empty()
    }
}

#[async_trait]
impl TurnoStore for InMemoryTurnoStore {
    async fn list(&self) -> Result<Vec<Turno>, StoreError> {
        Ok(self.turnos.read().await.clone())
    }

    async fn create(&self, nuevo: NuevoTurno) -> Result<Turno, StoreError> {
        let turno = Turno::from_nuevo(ObjectId::new(), nuevo);
        self.turnos.write().await.push(turno.clone());
        Ok(turno)
    }

    async fn update_fecha(
        &self,
        id: &str,
        fecha: Option<DateTime<Utc>>,
    ) -> Result<Option<Turno>, StoreError> {
        let id = parse_id(id)?;
        let mut turnos = self.turnos.write().await;

        Ok(turnos.iter_mut().find(|turno| turno.id == id).map(|turno| {
            turno.fecha = fecha;
            turno.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;
        self.turnos.write().await.retain(|turno| turno.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_fecha;

    fn nuevo(cliente: &str, fecha: &str) -> NuevoTurno {
        NuevoTurno {
            fecha: Some(parse_fecha(fecha).unwrap()),
            nombre_cliente: cliente.to_string(),
            nombre_mascota: "Rex".to_string(),
            servicio: "vacuna".to_string(),
        }
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryTurnoStore::new();
        assert!(store.list().await.unwrap().is_empty());

        let first = store.create(nuevo("Ana", "2024-03-01")).await.unwrap();
        let second = store.create(nuevo("Luis", "2024-01-01")).await.unwrap();

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_fecha_only_touches_the_date() {
        let store = InMemoryTurnoStore::new();
        let created = store.create(nuevo("Ana", "2024-01-10")).await.unwrap();
        let nueva = parse_fecha("2024-02-01").unwrap();

        let updated = store
            .update_fecha(&created.id.to_hex(), Some(nueva))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fecha, Some(nueva));
        assert_eq!(updated.nombre_cliente, created.nombre_cliente);
        assert_eq!(updated.nombre_mascota, created.nombre_mascota);
        assert_eq!(updated.servicio, created.servicio);
        assert_eq!(store.list().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn update_fecha_of_unknown_id_is_none() {
        let store = InMemoryTurnoStore::new();
        let result = store
            .update_fecha(&ObjectId::new().to_hex(), None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryTurnoStore::new();
        let created = store.create(nuevo("Ana", "2024-01-10")).await.unwrap();

        store.delete(&created.id.to_hex()).await.unwrap();
        assert!(store.is_empty().await);

        store.delete(&created.id.to_hex()).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected() {
        let store = InMemoryTurnoStore::new();
        assert!(matches!(
            store.delete("no-es-un-id").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.update_fecha("no-es-un-id", None).await,
            Err(StoreError::InvalidId(_))
        ));
    }
}
