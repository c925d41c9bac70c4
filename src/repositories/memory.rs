use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::Entity;
use crate::repositories::Repository;
use crate::utils::error::AppResult;

/// Transient store; contents are lost when the process exits.
///
/// Records are kept ordered by key so listings come back sorted.
pub struct InMemoryRepository<T: Entity> {
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn save(&self, entity: &T) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.insert(entity.key().to_string(), entity.clone());
        tracing::debug!(kind = T::KIND, key = entity.key(), "saved in memory");
        Ok(())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by(&self, filter: &T::Filter) -> AppResult<Vec<T>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let removed = self.records.write().await.remove(key).is_some();
        if removed {
            tracing::debug!(kind = T::KIND, key, "deleted from memory");
        }
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.records.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::aircraft::{Aircraft, AircraftFilter, AircraftStatus};

    #[tokio::test]
    async fn save_is_an_upsert() {
        let repo = InMemoryRepository::<Aircraft>::new();
        let mut aircraft = Aircraft::new("AC-100", "A320", "Airbus", 180, 2000);
        repo.save(&aircraft).await.unwrap();

        aircraft.status = AircraftStatus::Maintenance;
        repo.save(&aircraft).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AircraftStatus::Maintenance);
    }

    #[tokio::test]
    async fn delete_of_unknown_key_is_false() {
        let repo = InMemoryRepository::<Aircraft>::new();
        assert!(!repo.delete("missing").await.unwrap());
        assert!(!repo.exists("missing").await.unwrap());
        assert!(repo.find_by_key("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_is_sorted_and_filters_return_empty_on_no_match() {
        let repo = InMemoryRepository::<Aircraft>::new();
        for serial in ["AC-300", "AC-100", "AC-200"] {
            repo.save(&Aircraft::new(serial, "E190", "Embraer", 100, 900))
                .await
                .unwrap();
        }
        let serials: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.serial_number)
            .collect();
        assert_eq!(serials, vec!["AC-100", "AC-200", "AC-300"]);

        let grounded = repo
            .find_by(&AircraftFilter::Status(AircraftStatus::OutOfService))
            .await
            .unwrap();
        assert!(grounded.is_empty());
    }
}
