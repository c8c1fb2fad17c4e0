pub mod config;
pub mod error;
pub mod seed;
pub mod types;

pub use config::Config;
pub use error::PlannerError;
pub use types::*;
