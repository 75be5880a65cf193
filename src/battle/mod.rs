//! Battlefield aid - unit bases, facing arcs, measurement and movement
//!
//! Everything here is synchronous and single-threaded. Committed unit poses
//! change only through a movement proposal; all queries read committed poses.

pub mod alignment;
pub mod arcs;
pub mod battlefield;
pub mod constants;
pub mod events;
pub mod measurement;
pub mod movement;
pub mod report;
pub mod units;

// Re-exports for convenient access
pub use alignment::{aligned_rotation, Alignment};
pub use arcs::{
    corners, determine_arc, determine_arc_with_lookout, facing_arc, facing_arc_with_lookout,
    reference_point, FacingArc, Polygon4,
};
pub use battlefield::Battlefield;
pub use constants::*;
pub use events::{TableEvent, TableEventLog, TableEventType};
pub use measurement::{measure_to_point, measure_to_unit, Measurement};
pub use movement::{
    AxisKind, MovementProposal, MovementProposals, ProposalHandle, ProposalPhase, RestrictedAxis,
};
pub use report::{fold_rotation, MovementReport, ReportKind};
pub use units::{Footprint, Pose, Unit};
