//! The storage capability for the plan document.

use std::sync::Arc;

use async_trait::async_trait;
use planner_common::PlanDocument;
use tracing::info;

use crate::error::StoreResult;

/// Whole-document storage. Every write replaces the stored plan; the last
/// writer wins.
///
/// Implemented by `FileDocumentStore`, `PgDocumentStore` and
/// `MemoryDocumentStore`. Also implemented for `Arc<S>` so one store can be
/// shared between a router and test assertions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// The stored document, or `None` if nothing has been written yet.
    async fn load(&self) -> StoreResult<Option<PlanDocument>>;

    /// Overwrite the stored document.
    async fn replace(&self, doc: &PlanDocument) -> StoreResult<()>;

    /// The stored document, writing the seed plan first if the store is empty.
    async fn get(&self) -> StoreResult<PlanDocument> {
        if let Some(doc) = self.load().await? {
            return Ok(doc);
        }

        let seed = PlanDocument::seed();
        self.replace(&seed).await?;
        info!(backend = self.backend(), "Seeded default plan document");
        Ok(seed)
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    async fn load(&self) -> StoreResult<Option<PlanDocument>> {
        (**self).load().await
    }

    async fn replace(&self, doc: &PlanDocument) -> StoreResult<()> {
        (**self).replace(doc).await
    }

    async fn get(&self) -> StoreResult<PlanDocument> {
        (**self).get().await
    }
}
