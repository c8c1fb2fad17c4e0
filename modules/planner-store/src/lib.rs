//! Storage for the event planner.
//!
//! `DocumentStore` keeps the single plan document and has interchangeable
//! backends (JSON file, Postgres JSONB row, memory). `EventRowStore` keeps
//! the independent one-row-per-event table behind the forms UI.

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod postgres;
pub mod rows;

pub use document::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use file::FileDocumentStore;
pub use memory::{MemoryDocumentStore, MemoryEventRowStore};
pub use postgres::{PgDocumentStore, PgEventRowStore};
pub use rows::{EventRow, EventRowStore, NewEventRow};
