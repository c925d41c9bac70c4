pub mod aircraft;
pub mod flight;
pub mod person;
pub mod reservation;
pub mod user;

/// A record addressed by a natural key (serial number, DNI, flight number...).
///
/// `Filter` is the set of secondary lookups a repository answers for the record; the
/// in-memory backend evaluates it with [`Entity::matches`], the MySQL backend translates
/// it to a `WHERE` clause.
pub trait Entity: Clone + Send + Sync + 'static {
    type Filter: Send + Sync;

    /// Human name of the record kind, used in log lines and error messages.
    const KIND: &'static str;

    fn key(&self) -> &str;

    fn matches(&self, filter: &Self::Filter) -> bool;
}
