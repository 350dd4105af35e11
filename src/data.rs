use crate::{
    data::student::{StudentFields, StudentRecord},
    error::RosterResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;
use uuid::Uuid;

pub mod memory_store;
pub mod postgres_store;
pub mod student;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: Uuid,
}

#[derive(Deserialize)]
pub struct OptionalIdForm {
    pub id: Option<Uuid>,
}

/// Storage handle for student records.
///
/// A missing record is `Ok(None)`; `Err` is reserved for faults in the storage
/// engine itself. Each method maps onto exactly one call against the engine.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// Stores a new record and returns the identifier the store picked for it.
    async fn insert_into_database(&self, to_be_added: StudentFields) -> RosterResult<Uuid>;

    /// Every stored record, oldest first.
    async fn get_all(&self) -> RosterResult<Vec<StudentRecord>>;

    /// Overwrites all three content fields, returning the record as written.
    async fn replace_in_database(
        &self,
        id: Uuid,
        replacement: StudentFields,
    ) -> RosterResult<Option<StudentRecord>>;

    /// Removes the record, returning what was removed.
    async fn remove_from_database(&self, id: Uuid) -> RosterResult<Option<StudentRecord>>;

    async fn close(&self) {}
}
