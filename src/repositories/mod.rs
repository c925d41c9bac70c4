use async_trait::async_trait;
use std::sync::Arc;

use crate::models::aircraft::Aircraft;
use crate::models::flight::Flight;
use crate::models::person::{Employee, Passenger};
use crate::models::reservation::Reservation;
use crate::models::user::User;
use crate::models::Entity;
use crate::utils::error::AppResult;

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlStore;

/// Key-based storage for one record type.
///
/// `save` is an upsert keyed by [`Entity::key`]. `delete` answers `false` for an unknown
/// key and `find_by` answers an empty list for no matches; only storage failures are
/// errors.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn save(&self, entity: &T) -> AppResult<()>;

    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>>;

    async fn list_all(&self) -> AppResult<Vec<T>>;

    async fn find_by(&self, filter: &T::Filter) -> AppResult<Vec<T>>;

    async fn delete(&self, key: &str) -> AppResult<bool>;

    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// One repository per record type, all from the same backend.
#[derive(Clone)]
pub struct Repositories {
    pub aircraft: Arc<dyn Repository<Aircraft>>,
    pub employees: Arc<dyn Repository<Employee>>,
    pub passengers: Arc<dyn Repository<Passenger>>,
    pub flights: Arc<dyn Repository<Flight>>,
    pub reservations: Arc<dyn Repository<Reservation>>,
    pub users: Arc<dyn Repository<User>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Repositories {
            aircraft: Arc::new(InMemoryRepository::new()),
            employees: Arc::new(InMemoryRepository::new()),
            passengers: Arc::new(InMemoryRepository::new()),
            flights: Arc::new(InMemoryRepository::new()),
            reservations: Arc::new(InMemoryRepository::new()),
            users: Arc::new(InMemoryRepository::new()),
        }
    }

    pub fn mysql(store: MySqlStore) -> Self {
        let store = Arc::new(store);
        Repositories {
            aircraft: store.clone(),
            employees: store.clone(),
            passengers: store.clone(),
            flights: store.clone(),
            reservations: store.clone(),
            users: store,
        }
    }
}
