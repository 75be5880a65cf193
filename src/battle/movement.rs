//! Movement proposals: where a unit would end up if the move were committed
//!
//! A proposal is opened from a unit's committed pose, follows the pointer
//! (optionally along a single axis, or turning to face it), and is either
//! committed into the unit's pose or thrown away. One proposal per unit.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::battle::constants::{FORWARD_AXIS, SIDEWAYS_AXIS};
use crate::battle::report::MovementReport;
use crate::battle::units::{Pose, Unit};
use crate::core::error::{Result, TableError};
use crate::core::types::UnitId;
use crate::geometry::{Point, Vector};

/// Line constraining a proposal to one degree of freedom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedAxis {
    pub name: String,
    pub origin: Point,
    /// Never zero
    pub direction: Vector,
}

impl RestrictedAxis {
    pub fn new(name: impl Into<String>, origin: Point, direction: Vector) -> Result<Self> {
        let name = name.into();
        if direction.is_zero() {
            return Err(TableError::DegenerateAxis(name));
        }
        Ok(Self {
            name,
            origin,
            direction,
        })
    }

    /// Through the pose's center along its front normal
    pub fn forward(pose: &Pose) -> Self {
        Self {
            name: FORWARD_AXIS.to_string(),
            origin: pose.position(),
            direction: pose.direction_to_world(Point::new(0.0, -1.0)),
        }
    }

    /// Through the pose's center towards its left flank
    pub fn sideways(pose: &Pose) -> Self {
        Self {
            name: SIDEWAYS_AXIS.to_string(),
            origin: pose.position(),
            direction: pose.direction_to_world(Point::new(-1.0, 0.0)),
        }
    }

    /// Signed position of the orthogonal projection of `point`, in direction lengths
    pub fn parameter(&self, point: Point) -> f64 {
        (point - self.origin).dot(&self.direction) / self.direction.dot(&self.direction)
    }

    /// Orthogonal projection of `point` onto the axis
    pub fn project(&self, point: Point) -> Point {
        self.origin + self.direction * self.parameter(point)
    }
}

/// The two axes a player can lock a move to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    Forward,
    Sideways,
}

impl AxisKind {
    pub fn name(&self) -> &'static str {
        match self {
            AxisKind::Forward => FORWARD_AXIS,
            AxisKind::Sideways => SIDEWAYS_AXIS,
        }
    }

    pub fn axis_for(&self, pose: &Pose) -> RestrictedAxis {
        match self {
            AxisKind::Forward => RestrictedAxis::forward(pose),
            AxisKind::Sideways => RestrictedAxis::sideways(pose),
        }
    }
}

/// What the player is currently doing with the proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProposalPhase {
    #[default]
    Moving,
    Rotating,
}

/// Provisional pose for a unit being moved or rotated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementProposal {
    pub unit_id: UnitId,
    pub start_pose: Pose,
    pub current_pose: Pose,
    pub restricted_axis: Option<RestrictedAxis>,
    pub phase: ProposalPhase,
}

impl MovementProposal {
    fn new(unit: &Unit, phase: ProposalPhase) -> Self {
        Self {
            unit_id: unit.id,
            start_pose: unit.pose(),
            current_pose: unit.pose(),
            restricted_axis: None,
            phase,
        }
    }

    /// Report describing this proposal if it were committed now
    pub fn report(&self) -> MovementReport {
        MovementReport::from_poses(
            &self.start_pose,
            &self.current_pose,
            self.restricted_axis.as_ref(),
        )
    }

    /// Straight-line distance from the committed position
    pub fn displacement(&self) -> f64 {
        self.start_pose
            .position()
            .distance(&self.current_pose.position())
    }

    /// Signed turn relative to the committed heading
    pub fn turned_by(&self) -> f64 {
        self.current_pose.rotation() - self.start_pose.rotation()
    }
}

/// Token naming the proposal of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalHandle {
    unit_id: UnitId,
}

impl ProposalHandle {
    pub fn for_unit(unit_id: UnitId) -> Self {
        Self { unit_id }
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }
}

/// Registry of in-flight proposals keyed by unit
#[derive(Debug, Clone, Default)]
pub struct MovementProposals {
    active: AHashMap<UnitId, MovementProposal>,
}

impl MovementProposals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a move for `unit`, or reuse its open proposal
    pub fn begin_move(&mut self, unit: &Unit) -> ProposalHandle {
        self.begin(unit, ProposalPhase::Moving)
    }

    /// Open a rotation for `unit`, or reuse its open proposal
    pub fn begin_rotate(&mut self, unit: &Unit) -> ProposalHandle {
        self.begin(unit, ProposalPhase::Rotating)
    }

    fn begin(&mut self, unit: &Unit, phase: ProposalPhase) -> ProposalHandle {
        let proposal = self.active.entry(unit.id).or_insert_with(|| {
            tracing::debug!("Opened movement proposal for {}", unit.name);
            MovementProposal::new(unit, phase)
        });
        proposal.phase = phase;
        ProposalHandle::for_unit(unit.id)
    }

    pub fn get(&self, handle: ProposalHandle) -> Option<&MovementProposal> {
        self.active.get(&handle.unit_id)
    }

    pub fn is_active(&self, unit_id: UnitId) -> bool {
        self.active.contains_key(&unit_id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn get_mut(&mut self, handle: ProposalHandle) -> Result<&mut MovementProposal> {
        self.active
            .get_mut(&handle.unit_id)
            .ok_or(TableError::NoActiveProposal(handle.unit_id))
    }

    /// Follow the pointer; with an axis set, snap onto the axis instead
    pub fn update_free(&mut self, handle: ProposalHandle, cursor: Point) -> Result<Pose> {
        let proposal = self.get_mut(handle)?;
        let target = match &proposal.restricted_axis {
            Some(axis) => axis.project(cursor),
            None => cursor,
        };
        proposal.current_pose.set_position(target);
        Ok(proposal.current_pose)
    }

    pub fn restrict_to_axis(&mut self, handle: ProposalHandle, axis: RestrictedAxis) -> Result<()> {
        if axis.direction.is_zero() {
            return Err(TableError::DegenerateAxis(axis.name));
        }
        let proposal = self.get_mut(handle)?;
        tracing::debug!("Restricting {:?} to the {} axis", handle.unit_id, axis.name);
        // The report reads the axis parameter, so the pose must already lie on the axis
        let snapped = axis.project(proposal.current_pose.position());
        proposal.current_pose.set_position(snapped);
        proposal.restricted_axis = Some(axis);
        Ok(())
    }

    /// Drop any axis; returns the axis that was active
    pub fn clear_restriction(&mut self, handle: ProposalHandle) -> Result<Option<RestrictedAxis>> {
        let proposal = self.get_mut(handle)?;
        Ok(proposal.restricted_axis.take())
    }

    /// Lock to the axis of `kind` built from the committed pose, or unlock if it is already active
    ///
    /// Locking snaps the proposal onto the new axis. Returns the name of the
    /// axis left active.
    pub fn toggle_axis(&mut self, handle: ProposalHandle, kind: AxisKind) -> Result<Option<&'static str>> {
        let proposal = self.get_mut(handle)?;
        let already_active = proposal
            .restricted_axis
            .as_ref()
            .is_some_and(|axis| axis.name == kind.name());
        if already_active {
            proposal.restricted_axis = None;
            return Ok(None);
        }
        let axis = kind.axis_for(&proposal.start_pose);
        self.restrict_to_axis(handle, axis)?;
        Ok(Some(kind.name()))
    }

    /// Turn to face `cursor`; a cursor on the unit's center leaves the heading alone
    pub fn rotate_to(&mut self, handle: ProposalHandle, cursor: Point) -> Result<f64> {
        let proposal = self.get_mut(handle)?;
        if let Some(heading) = proposal.current_pose.position().heading_to(&cursor) {
            proposal.current_pose.set_rotation(heading);
        }
        Ok(proposal.current_pose.rotation())
    }

    /// Set an explicit heading, normalized into [0, 360)
    pub fn set_rotation(&mut self, handle: ProposalHandle, degrees: f64) -> Result<f64> {
        let proposal = self.get_mut(handle)?;
        proposal.current_pose.set_rotation(degrees);
        Ok(proposal.current_pose.rotation())
    }

    /// Write the proposed pose into `unit` and close the proposal
    pub fn commit(&mut self, handle: ProposalHandle, unit: &mut Unit) -> Result<MovementReport> {
        if unit.id != handle.unit_id {
            return Err(TableError::ProposalMismatch {
                proposal: handle.unit_id,
                unit: unit.id,
            });
        }
        let proposal = self
            .active
            .remove(&handle.unit_id)
            .ok_or(TableError::NoActiveProposal(handle.unit_id))?;
        let report = proposal.report();
        unit.pose = proposal.current_pose;
        Ok(report)
    }

    /// Throw the proposal away; the unit keeps its committed pose
    pub fn cancel(&mut self, handle: ProposalHandle) -> Result<MovementProposal> {
        let proposal = self
            .active
            .remove(&handle.unit_id)
            .ok_or(TableError::NoActiveProposal(handle.unit_id))?;
        tracing::debug!("Cancelled movement proposal for {:?}", handle.unit_id);
        Ok(proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::units::Footprint;

    fn unit_at(x: f64, y: f64, rotation: f64) -> Unit {
        Unit::new(
            "Spearmen",
            Footprint::new(10.0, 4.0).unwrap(),
            Pose::new(x, y, rotation),
        )
    }

    #[test]
    fn test_begin_move_is_idempotent() {
        let unit = unit_at(0.0, 0.0, 0.0);
        let mut proposals = MovementProposals::new();
        let first = proposals.begin_move(&unit);
        proposals.update_free(first, Point::new(3.0, 3.0)).unwrap();

        let second = proposals.begin_move(&unit);
        assert_eq!(first, second);
        assert_eq!(proposals.len(), 1);
        // Reused, not reset
        assert_eq!(
            proposals.get(second).unwrap().current_pose.position(),
            Point::new(3.0, 3.0)
        );
    }

    #[test]
    fn test_update_free_keeps_rotation() {
        let unit = unit_at(0.0, 0.0, 45.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        let pose = proposals.update_free(handle, Point::new(7.0, -2.0)).unwrap();
        assert_eq!(pose.position(), Point::new(7.0, -2.0));
        assert_eq!(pose.rotation(), 45.0);
    }

    #[test]
    fn test_axis_projection() {
        let unit = unit_at(0.0, 0.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        let axis = RestrictedAxis::new(FORWARD_AXIS, Point::ZERO, Point::new(0.0, -1.0)).unwrap();
        proposals.restrict_to_axis(handle, axis).unwrap();

        let pose = proposals.update_free(handle, Point::new(5.0, -6.0)).unwrap();
        assert_eq!(pose.position(), Point::new(0.0, -6.0));

        proposals.clear_restriction(handle).unwrap();
        let pose = proposals.update_free(handle, Point::new(5.0, -6.0)).unwrap();
        assert_eq!(pose.position(), Point::new(5.0, -6.0));
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        assert!(matches!(
            RestrictedAxis::new("BROKEN", Point::ZERO, Point::ZERO),
            Err(TableError::DegenerateAxis(_))
        ));

        let unit = unit_at(0.0, 0.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        let axis = RestrictedAxis {
            name: "BROKEN".to_string(),
            origin: Point::ZERO,
            direction: Point::ZERO,
        };
        assert!(matches!(
            proposals.restrict_to_axis(handle, axis),
            Err(TableError::DegenerateAxis(_))
        ));
        assert!(proposals.get(handle).unwrap().restricted_axis.is_none());
    }

    #[test]
    fn test_toggle_axis() {
        let unit = unit_at(10.0, 10.0, 90.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);

        assert_eq!(proposals.toggle_axis(handle, AxisKind::Forward).unwrap(), Some(FORWARD_AXIS));
        assert_eq!(proposals.toggle_axis(handle, AxisKind::Sideways).unwrap(), Some(SIDEWAYS_AXIS));
        assert_eq!(proposals.toggle_axis(handle, AxisKind::Sideways).unwrap(), None);
        assert!(proposals.get(handle).unwrap().restricted_axis.is_none());
    }

    #[test]
    fn test_axis_after_free_move_snaps_pose() {
        let mut unit = unit_at(10.0, 10.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.update_free(handle, Point::new(30.0, 4.0)).unwrap();
        proposals.toggle_axis(handle, AxisKind::Forward).unwrap();
        assert_eq!(
            proposals.get(handle).unwrap().current_pose.position(),
            Point::new(10.0, 4.0)
        );

        let report = proposals.commit(handle, &mut unit).unwrap();
        assert_eq!(unit.pose().position(), Point::new(10.0, 4.0));
        assert_eq!(report.distance, 6.0);
        assert_eq!(report.direction_label, "forward");
    }

    #[test]
    fn test_axis_after_pure_sideways_move_reports_no_movement() {
        // Moving straight sideways then locking forward lands back on the start
        let mut unit = unit_at(10.0, 10.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.update_free(handle, Point::new(30.0, 10.0)).unwrap();
        proposals.toggle_axis(handle, AxisKind::Forward).unwrap();

        let report = proposals.commit(handle, &mut unit).unwrap();
        assert_eq!(unit.pose().position(), Point::new(10.0, 10.0));
        assert_eq!(report.distance, 0.0);
    }

    #[test]
    fn test_switching_axis_mid_move() {
        let mut unit = unit_at(10.0, 10.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.toggle_axis(handle, AxisKind::Forward).unwrap();
        proposals.update_free(handle, Point::new(12.0, 5.0)).unwrap();
        assert_eq!(
            proposals.get(handle).unwrap().current_pose.position(),
            Point::new(10.0, 5.0)
        );

        // The sideways axis runs through the start, so the forward progress is dropped
        proposals.toggle_axis(handle, AxisKind::Sideways).unwrap();
        assert_eq!(
            proposals.get(handle).unwrap().current_pose.position(),
            Point::new(10.0, 10.0)
        );
        proposals.update_free(handle, Point::new(7.0, 3.0)).unwrap();

        let report = proposals.commit(handle, &mut unit).unwrap();
        assert_eq!(unit.pose().position(), Point::new(7.0, 10.0));
        assert_eq!(report.distance, 3.0);
        assert_eq!(report.direction_label, "to the left");
    }

    #[test]
    fn test_axes_come_from_committed_pose() {
        let unit = unit_at(10.0, 10.0, 90.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.set_rotation(handle, 0.0).unwrap();
        proposals.update_free(handle, Point::new(40.0, 40.0)).unwrap();
        proposals.toggle_axis(handle, AxisKind::Forward).unwrap();

        let axis = proposals.get(handle).unwrap().restricted_axis.clone().unwrap();
        assert_eq!(axis.origin, Point::new(10.0, 10.0));
        assert!((axis.direction.x - 1.0).abs() < 1e-9);
        assert!(axis.direction.y.abs() < 1e-9);
    }

    #[test]
    fn test_rotate_to_faces_cursor() {
        let unit = unit_at(0.0, 0.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_rotate(&unit);
        let heading = proposals.rotate_to(handle, Point::new(10.0, 0.0)).unwrap();
        assert!((heading - 90.0).abs() < 1e-9);

        let heading = proposals.rotate_to(handle, Point::new(-1.0, -1.0)).unwrap();
        assert!((heading - 315.0).abs() < 1e-9);

        // Cursor on the center: no heading to take
        let heading = proposals.rotate_to(handle, Point::ZERO).unwrap();
        assert!((heading - 315.0).abs() < 1e-9);
        assert_eq!(proposals.get(handle).unwrap().phase, ProposalPhase::Rotating);
    }

    #[test]
    fn test_cancel_leaves_unit_untouched() {
        let unit = unit_at(3.0, 4.0, 12.0);
        let before = unit.pose();
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.update_free(handle, Point::new(30.0, 40.0)).unwrap();
        proposals.cancel(handle).unwrap();
        assert_eq!(unit.pose(), before);
        assert!(proposals.is_empty());
    }

    #[test]
    fn test_commit_writes_pose_once() {
        let mut unit = unit_at(0.0, 0.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        proposals.update_free(handle, Point::new(3.0, 4.0)).unwrap();

        let report = proposals.commit(handle, &mut unit).unwrap();
        assert_eq!(report.distance, 5.0);
        assert_eq!(unit.pose().position(), Point::new(3.0, 4.0));

        assert!(matches!(
            proposals.commit(handle, &mut unit),
            Err(TableError::NoActiveProposal(_))
        ));
        assert!(matches!(
            proposals.update_free(handle, Point::ZERO),
            Err(TableError::NoActiveProposal(_))
        ));
        assert!(matches!(
            proposals.cancel(handle),
            Err(TableError::NoActiveProposal(_))
        ));
    }

    #[test]
    fn test_commit_to_wrong_unit() {
        let unit = unit_at(0.0, 0.0, 0.0);
        let mut other = unit_at(5.0, 5.0, 0.0);
        let mut proposals = MovementProposals::new();
        let handle = proposals.begin_move(&unit);
        assert!(matches!(
            proposals.commit(handle, &mut other),
            Err(TableError::ProposalMismatch { .. })
        ));
        assert!(proposals.is_active(unit.id));
    }
}
