//! One-row-per-event table behind the forms UI. Unrelated to the plan
//! document's catalog.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use crate::error::StoreResult;

/// A stored row. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
}

/// Field values for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRow {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
}

impl NewEventRow {
    pub fn into_row(self, id: i32) -> EventRow {
        EventRow {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
        }
    }
}

/// Per-row CRUD. No validation happens here; update and delete of an
/// absent id are no-ops that report `false`.
#[async_trait]
pub trait EventRowStore: Send + Sync {
    /// All rows, ordered by date then time.
    async fn list(&self) -> StoreResult<Vec<EventRow>>;

    async fn get(&self, id: i32) -> StoreResult<Option<EventRow>>;

    async fn create(&self, row: &NewEventRow) -> StoreResult<EventRow>;

    async fn update(&self, id: i32, row: &NewEventRow) -> StoreResult<bool>;

    async fn delete(&self, id: i32) -> StoreResult<bool>;
}

#[async_trait]
impl<S: EventRowStore + ?Sized> EventRowStore for Arc<S> {
    async fn list(&self) -> StoreResult<Vec<EventRow>> {
        (**self).list().await
    }

    async fn get(&self, id: i32) -> StoreResult<Option<EventRow>> {
        (**self).get(id).await
    }

    async fn create(&self, row: &NewEventRow) -> StoreResult<EventRow> {
        (**self).create(row).await
    }

    async fn update(&self, id: i32, row: &NewEventRow) -> StoreResult<bool> {
        (**self).update(id, row).await
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        (**self).delete(id).await
    }
}
