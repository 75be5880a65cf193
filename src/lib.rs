//! Kowsim - Tabletop Battlefield Aid
//!
//! Rectangular unit bases on a table measured in inches, their facing arcs,
//! leader-point distances and the move/rotate/commit proposal workflow.

pub mod battle;
pub mod command;
pub mod core;
pub mod geometry;
