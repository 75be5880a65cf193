pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EngineConfig};
pub use error::{Result, TableError};
pub use types::UnitId;
