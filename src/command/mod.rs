//! Input pipeline for the table
//!
//! Console text -> `parse_command` -> `TableCommand` -> `Interaction` -> `InteractionOutcome`

pub mod interaction;
pub mod parser;

pub use interaction::{Interaction, InteractionMode, InteractionOutcome, TableCommand};
pub use parser::{parse_command, ConsoleInput};
