//! The table: committed units plus the proposals being worked on
//!
//! Units are addressed by id. Queries (arcs, distances, hit tests) always use
//! committed poses, never an in-flight proposal.

use ahash::AHashMap;

use crate::battle::alignment::{aligned_rotation, Alignment};
use crate::battle::arcs::{
    determine_arc_with_lookout, facing_arc_with_lookout, reference_point, FacingArc, Polygon4,
};
use crate::battle::events::{TableEventLog, TableEventType};
use crate::battle::measurement::{measure_to_point, measure_to_unit, Measurement};
use crate::battle::movement::{
    AxisKind, MovementProposal, MovementProposals, ProposalHandle, RestrictedAxis,
};
use crate::battle::report::MovementReport;
use crate::battle::units::{Footprint, Pose, Unit};
use crate::core::config::{EngineConfig, TableConfig};
use crate::core::error::{Result, TableError};
use crate::core::types::UnitId;
use crate::geometry::Point;

#[derive(Debug, Clone)]
pub struct Battlefield {
    units: AHashMap<UnitId, Unit>,
    /// Placement order; later units sit on top for hit testing
    order: Vec<UnitId>,
    proposals: MovementProposals,
    pub log: TableEventLog,
    table: TableConfig,
    lookout: f64,
    report_epsilon: f64,
}

impl Battlefield {
    /// Empty table with the configured settings
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            units: AHashMap::new(),
            order: Vec::new(),
            proposals: MovementProposals::new(),
            log: TableEventLog::new(),
            table: config.table.clone(),
            lookout: config.arcs.lookout_distance,
            report_epsilon: config.report.epsilon,
        }
    }

    /// Table with the configured deployment already placed
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut field = Self::new(config);
        for deployment in &config.units {
            let footprint = Footprint::from_millimeters(deployment.width_mm, deployment.depth_mm)?;
            let pose = Pose::new(deployment.x, deployment.y, deployment.rotation);
            field.add_unit(Unit::new(deployment.name.clone(), footprint, pose));
        }
        Ok(field)
    }

    pub fn add_unit(&mut self, unit: Unit) -> UnitId {
        let id = unit.id;
        tracing::debug!("Placed {} at ({:.2}, {:.2})", unit.name, unit.pose().x, unit.pose().y);
        self.log.push(
            TableEventType::UnitPlaced { unit_id: id },
            format!("{} placed on the table.", unit.name),
        );
        self.order.push(id);
        self.units.insert(id, unit);
        id
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(&id).ok_or(TableError::UnknownUnit(id))
    }

    /// Exact, then case-insensitive, then unique-prefix match on the unit name
    pub fn unit_by_name(&self, name: &str) -> Result<&Unit> {
        if let Some(unit) = self.units().find(|u| u.name == name) {
            return Ok(unit);
        }
        let lowered = name.to_lowercase();
        if let Some(unit) = self.units().find(|u| u.name.to_lowercase() == lowered) {
            return Ok(unit);
        }
        let mut prefixed = self
            .units()
            .filter(|u| u.name.to_lowercase().starts_with(&lowered));
        match (prefixed.next(), prefixed.next()) {
            (Some(unit), None) if !lowered.is_empty() => Ok(unit),
            _ => Err(TableError::UnknownUnitName(name.to_string())),
        }
    }

    /// Units in placement order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.order.iter().filter_map(|id| self.units.get(id))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Topmost unit whose base contains `point`
    pub fn unit_at(&self, point: Point) -> Option<UnitId> {
        self.order
            .iter()
            .rev()
            .find(|id| self.units.get(*id).is_some_and(|u| u.rect().contains(point)))
            .copied()
    }

    pub fn is_on_table(&self, point: Point) -> bool {
        (0.0..=self.table.width).contains(&point.x) && (0.0..=self.table.depth).contains(&point.y)
    }

    pub fn report_epsilon(&self) -> f64 {
        self.report_epsilon
    }

    pub fn proposal(&self, id: UnitId) -> Option<&MovementProposal> {
        self.proposals.get(ProposalHandle::for_unit(id))
    }

    pub fn begin_move(&mut self, id: UnitId) -> Result<ProposalHandle> {
        let unit = self.units.get(&id).ok_or(TableError::UnknownUnit(id))?;
        Ok(self.proposals.begin_move(unit))
    }

    pub fn begin_rotate(&mut self, id: UnitId) -> Result<ProposalHandle> {
        let unit = self.units.get(&id).ok_or(TableError::UnknownUnit(id))?;
        Ok(self.proposals.begin_rotate(unit))
    }

    pub fn update_free(&mut self, handle: ProposalHandle, cursor: Point) -> Result<Pose> {
        self.proposals.update_free(handle, cursor)
    }

    pub fn toggle_axis(&mut self, handle: ProposalHandle, kind: AxisKind) -> Result<Option<&'static str>> {
        self.proposals.toggle_axis(handle, kind)
    }

    pub fn restrict_to_axis(&mut self, handle: ProposalHandle, axis: RestrictedAxis) -> Result<()> {
        self.proposals.restrict_to_axis(handle, axis)
    }

    pub fn clear_restriction(&mut self, handle: ProposalHandle) -> Result<()> {
        self.proposals.clear_restriction(handle).map(|_| ())
    }

    pub fn rotate_to(&mut self, handle: ProposalHandle, cursor: Point) -> Result<f64> {
        self.proposals.rotate_to(handle, cursor)
    }

    pub fn set_rotation(&mut self, handle: ProposalHandle, degrees: f64) -> Result<f64> {
        self.proposals.set_rotation(handle, degrees)
    }

    /// Turn `id`'s proposal to square up with one side of `target`
    pub fn align_to(&mut self, id: UnitId, target: UnitId, alignment: Alignment) -> Result<ProposalHandle> {
        let target_pose = self.unit(target)?.pose();
        let handle = self.begin_rotate(id)?;
        self.proposals
            .set_rotation(handle, aligned_rotation(&target_pose, alignment))?;
        Ok(handle)
    }

    /// Commit the proposal into the unit's pose and log the report
    pub fn commit(&mut self, handle: ProposalHandle) -> Result<MovementReport> {
        let id = handle.unit_id();
        let unit = self.units.get_mut(&id).ok_or(TableError::UnknownUnit(id))?;
        let report = self.proposals.commit(handle, unit)?;
        let name = unit.name.clone();
        let position = unit.pose().position();

        let description = report
            .summary(&name, self.report_epsilon)
            .unwrap_or_else(|| format!("{} stays in place.", name));
        tracing::info!("{}", description);

        if !self.is_on_table(position) {
            tracing::warn!(
                "{} ends its move off the table at ({:.2}, {:.2})",
                name,
                position.x,
                position.y
            );
        }

        self.log.push(
            TableEventType::MoveCommitted {
                unit_id: id,
                report: report.clone(),
            },
            description,
        );
        Ok(report)
    }

    /// Discard the proposal, leaving the unit where it was
    pub fn cancel(&mut self, handle: ProposalHandle) -> Result<()> {
        let id = handle.unit_id();
        let name = self.unit(id)?.name.clone();
        self.proposals.cancel(handle)?;
        self.log.push(
            TableEventType::MoveCancelled { unit_id: id },
            format!("Movement of {} cancelled.", name),
        );
        Ok(())
    }

    /// Measure from `from`'s leader point to `target`'s base and log it
    pub fn measure(&mut self, from: UnitId, target: UnitId) -> Result<Measurement> {
        let measurement = self.peek_measure(from, target)?;
        let description =
            measurement.describe(&self.unit(from)?.name, &self.unit(target)?.name);
        tracing::info!("{}", description);
        self.log.push(
            TableEventType::DistanceMeasured {
                unit_id: from,
                target_id: target,
                distance: measurement.distance,
            },
            description,
        );
        Ok(measurement)
    }

    /// Measurement without logging, for hover feedback
    pub fn peek_measure(&self, from: UnitId, target: UnitId) -> Result<Measurement> {
        Ok(measure_to_unit(self.unit(from)?, self.unit(target)?))
    }

    pub fn measure_point(&self, from: UnitId, point: Point) -> Result<Measurement> {
        Ok(measure_to_point(self.unit(from)?, point))
    }

    /// Which arc of `target` holds `observer`'s leader point, logged
    pub fn arc_of(&mut self, observer: UnitId, target: UnitId) -> Result<Option<FacingArc>> {
        let observer_unit = self.unit(observer)?;
        let target_unit = self.unit(target)?;
        let leader = reference_point(&observer_unit.pose(), &observer_unit.footprint());
        let arc = determine_arc_with_lookout(
            leader,
            &target_unit.pose(),
            &target_unit.footprint(),
            self.lookout,
        );
        let description = match arc {
            Some(arc) => format!(
                "{} is in the {} arc of {}.",
                observer_unit.name,
                arc.label(),
                target_unit.name
            ),
            None => format!(
                "{} is in no arc of {}.",
                observer_unit.name, target_unit.name
            ),
        };
        tracing::info!("{}", description);
        self.log.push(
            TableEventType::ArcChecked {
                unit_id: observer,
                target_id: target,
                arc,
            },
            description,
        );
        Ok(arc)
    }

    /// All four arc polygons of a unit, in priority order
    pub fn facing_arcs(&self, id: UnitId) -> Result<[(FacingArc, Polygon4); 4]> {
        let unit = self.unit(id)?;
        let (pose, footprint) = (unit.pose(), unit.footprint());
        Ok(FacingArc::PRIORITY
            .map(|which| (which, facing_arc_with_lookout(&pose, &footprint, which, self.lookout))))
    }
}
