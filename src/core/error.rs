use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Restriction axis {0} has a zero-length direction")]
    DegenerateAxis(String),

    #[error("Degenerate footprint: {width} x {depth}")]
    DegenerateFootprint { width: f64, depth: f64 },

    #[error("Invalid footprint: {width} x {depth}")]
    InvalidFootprint { width: f64, depth: f64 },

    #[error("No active movement proposal for unit: {0:?}")]
    NoActiveProposal(UnitId),

    #[error("Unit not found: {0:?}")]
    UnknownUnit(UnitId),

    #[error("No unit named: {0}")]
    UnknownUnitName(String),

    #[error("Proposal for {proposal:?} cannot be committed to {unit:?}")]
    ProposalMismatch { proposal: UnitId, unit: UnitId },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No unit selected")]
    NoSelection,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
