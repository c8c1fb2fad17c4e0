//! In-process stores for tests and throwaway runs. Nothing survives the
//! process.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use planner_common::PlanDocument;
use tokio::sync::RwLock;

use crate::document::DocumentStore;
use crate::error::StoreResult;
use crate::rows::{EventRow, EventRowStore, NewEventRow};

// ---------------------------------------------------------------------------
// MemoryDocumentStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryDocumentStore {
    doc: RwLock<Option<PlanDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: PlanDocument) -> Self {
        Self {
            doc: RwLock::new(Some(doc)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> StoreResult<Option<PlanDocument>> {
        Ok(self.doc.read().await.clone())
    }

    async fn replace(&self, doc: &PlanDocument) -> StoreResult<()> {
        *self.doc.write().await = Some(doc.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryEventRowStore
// ---------------------------------------------------------------------------

/// Row store with incrementing ids, like a SERIAL column.
pub struct MemoryEventRowStore {
    next_id: AtomicI32,
    rows: RwLock<Vec<EventRow>>,
}

impl MemoryEventRowStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryEventRowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRowStore for MemoryEventRowStore {
    async fn list(&self) -> StoreResult<Vec<EventRow>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| (a.date, a.time, a.id).cmp(&(b.date, b.time, b.id)));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<EventRow>> {
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, row: &NewEventRow) -> StoreResult<EventRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = row.clone().into_row(id);
        self.rows.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, row: &NewEventRow) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = row.clone().into_row(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}
