//! Server-rendered events table: an add form plus inline edit and delete
//! per row.

pub mod pages;
pub mod templates;

pub use pages::{build_router, AppState};
