//! Interaction state machine
//!
//! The current mode and selection live in an `Interaction` value owned by the
//! front-end. Pointer samples and discrete commands are fed in one at a time,
//! in arrival order; the latest pointer sample always wins.

use serde::{Deserialize, Serialize};

use crate::battle::{Alignment, AxisKind, Battlefield, Pose, ProposalHandle, ProposalPhase};
use crate::core::error::{Result, TableError};
use crate::core::types::UnitId;
use crate::geometry::Point;

/// How pointer input is currently interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Moving(UnitId),
    Rotating(UnitId),
    Aligning(UnitId, Alignment),
    CheckingDistance(UnitId),
    CheckingArc(UnitId),
}

/// Discrete input from the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableCommand {
    Select(String),
    ClearSelection,
    StartMove,
    StartRotate,
    ToggleAxis(AxisKind),
    StartAlign(Alignment),
    CheckDistance,
    CheckArc,
    PointerMove(Point),
    PointerClick(Point),
    SetRotation(f64),
    Finalize,
    Cancel,
    Abort,
}

/// What the front-end should show after a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionOutcome {
    /// Status line text
    pub status: String,
    /// Lines for the game log
    pub log: Vec<String>,
    /// Floating counter next to the pointer (distance or angle)
    pub counter: Option<String>,
    /// Pose to draw as a translucent preview
    pub preview: Option<Pose>,
    /// Set when the command was rejected and ignored
    pub rejected: Option<String>,
}

impl InteractionOutcome {
    fn status(status: String) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

/// Selection plus mode; one per front-end
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    mode: InteractionMode,
    selected: Option<UnitId>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Apply a command, turning rejected commands into logged no-ops
    pub fn dispatch(&mut self, field: &mut Battlefield, command: TableCommand) -> InteractionOutcome {
        match self.handle(field, command.clone()) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Ignoring {:?}: {}", command, err);
                InteractionOutcome {
                    status: self.idle_status(field),
                    rejected: Some(err.to_string()),
                    ..InteractionOutcome::default()
                }
            }
        }
    }

    /// Apply a command, surfacing sequencing errors to the caller
    pub fn handle(&mut self, field: &mut Battlefield, command: TableCommand) -> Result<InteractionOutcome> {
        match command {
            TableCommand::Select(name) => {
                let id = field.unit_by_name(&name)?.id;
                self.select(field, Some(id))
            }
            TableCommand::ClearSelection => self.select(field, None),
            TableCommand::StartMove => {
                let id = self.require_selection()?;
                let handle = field.begin_move(id)?;
                self.mode = InteractionMode::Moving(id);
                Ok(InteractionOutcome {
                    preview: field.proposal(id).map(|p| p.current_pose),
                    ..InteractionOutcome::status(self.moving_status(field, handle)?)
                })
            }
            TableCommand::StartRotate => {
                let id = self.require_selection()?;
                field.begin_rotate(id)?;
                self.mode = InteractionMode::Rotating(id);
                Ok(InteractionOutcome::status(format!(
                    "Rotating {}.",
                    field.unit(id)?.name
                )))
            }
            TableCommand::ToggleAxis(kind) => {
                let id = self.require_selection()?;
                if field.proposal(id).is_none() {
                    return Err(TableError::NoActiveProposal(id));
                }
                let handle = ProposalHandle::for_unit(id);
                field.toggle_axis(handle, kind)?;
                self.mode = InteractionMode::Moving(id);
                Ok(InteractionOutcome::status(self.moving_status(field, handle)?))
            }
            TableCommand::StartAlign(alignment) => {
                let id = self.require_selection()?;
                self.mode = InteractionMode::Aligning(id, alignment);
                Ok(InteractionOutcome::status(format!(
                    "Aligning {} to a {}. Click the target unit.",
                    field.unit(id)?.name,
                    alignment.label()
                )))
            }
            TableCommand::CheckDistance => {
                let id = self.require_selection()?;
                self.mode = InteractionMode::CheckingDistance(id);
                Ok(InteractionOutcome::status(format!(
                    "Checking distance from {}.",
                    field.unit(id)?.name
                )))
            }
            TableCommand::CheckArc => {
                let id = self.require_selection()?;
                self.mode = InteractionMode::CheckingArc(id);
                Ok(InteractionOutcome::status(format!(
                    "Checking arcs from {}.",
                    field.unit(id)?.name
                )))
            }
            TableCommand::PointerMove(point) => self.pointer_move(field, point),
            TableCommand::PointerClick(point) => self.pointer_click(field, point),
            TableCommand::SetRotation(degrees) => {
                let id = self.require_selection()?;
                let handle = field.begin_rotate(id)?;
                field.set_rotation(handle, degrees)?;
                Ok(InteractionOutcome {
                    counter: self.angle_counter(field, id),
                    preview: field.proposal(id).map(|p| p.current_pose),
                    ..InteractionOutcome::status(self.idle_status(field))
                })
            }
            TableCommand::Finalize => {
                let id = self.require_selection()?;
                let report = field.commit(ProposalHandle::for_unit(id))?;
                self.mode = InteractionMode::Idle;
                let name = &field.unit(id)?.name;
                let log = report
                    .summary(name, field.report_epsilon())
                    .into_iter()
                    .collect();
                Ok(InteractionOutcome {
                    log,
                    ..InteractionOutcome::status(self.idle_status(field))
                })
            }
            TableCommand::Cancel => {
                let id = self.require_selection()?;
                field.cancel(ProposalHandle::for_unit(id))?;
                self.mode = InteractionMode::Idle;
                Ok(InteractionOutcome::status(self.idle_status(field)))
            }
            TableCommand::Abort => {
                self.mode = InteractionMode::Idle;
                Ok(InteractionOutcome::status(self.idle_status(field)))
            }
        }
    }

    fn pointer_move(&mut self, field: &mut Battlefield, point: Point) -> Result<InteractionOutcome> {
        let status = self.current_status(field)?;
        match self.mode {
            InteractionMode::Moving(id) => {
                let pose = field.update_free(ProposalHandle::for_unit(id), point)?;
                Ok(InteractionOutcome {
                    counter: self.distance_counter(field, id),
                    preview: Some(pose),
                    ..InteractionOutcome::status(status)
                })
            }
            InteractionMode::Rotating(id) => {
                field.rotate_to(ProposalHandle::for_unit(id), point)?;
                Ok(InteractionOutcome {
                    counter: self.angle_counter(field, id),
                    preview: field.proposal(id).map(|p| p.current_pose),
                    ..InteractionOutcome::status(status)
                })
            }
            InteractionMode::CheckingDistance(id) => {
                let measurement = match field.unit_at(point) {
                    Some(target) if target != id => field.peek_measure(id, target)?,
                    _ => field.measure_point(id, point)?,
                };
                Ok(InteractionOutcome {
                    counter: Some(measurement.label()),
                    ..InteractionOutcome::status(status)
                })
            }
            _ => Ok(InteractionOutcome::status(status)),
        }
    }

    fn pointer_click(&mut self, field: &mut Battlefield, point: Point) -> Result<InteractionOutcome> {
        match self.mode {
            InteractionMode::Idle => {
                let unit = field.unit_at(point);
                self.select(field, unit)
            }
            InteractionMode::Moving(id) => {
                let pose = field.update_free(ProposalHandle::for_unit(id), point)?;
                Ok(InteractionOutcome {
                    counter: self.distance_counter(field, id),
                    preview: Some(pose),
                    ..InteractionOutcome::status(self.current_status(field)?)
                })
            }
            InteractionMode::Rotating(id) => {
                field.rotate_to(ProposalHandle::for_unit(id), point)?;
                self.mode = InteractionMode::Idle;
                Ok(InteractionOutcome {
                    counter: self.angle_counter(field, id),
                    preview: field.proposal(id).map(|p| p.current_pose),
                    ..InteractionOutcome::status(self.idle_status(field))
                })
            }
            InteractionMode::Aligning(id, alignment) => {
                self.mode = InteractionMode::Idle;
                let mut outcome = InteractionOutcome::default();
                // Clicking empty table or the unit itself just leaves the mode
                if let Some(target) = field.unit_at(point).filter(|t| *t != id) {
                    field.align_to(id, target, alignment)?;
                    outcome.log.push(format!(
                        "{} aligned to the {} of {}.",
                        field.unit(id)?.name,
                        alignment.label(),
                        field.unit(target)?.name
                    ));
                    outcome.preview = field.proposal(id).map(|p| p.current_pose);
                }
                outcome.status = self.idle_status(field);
                Ok(outcome)
            }
            InteractionMode::CheckingDistance(id) => {
                let status = self.current_status(field)?;
                let from_name = field.unit(id)?.name.clone();
                let outcome = match field.unit_at(point) {
                    Some(target) if target != id => {
                        let measurement = field.measure(id, target)?;
                        InteractionOutcome {
                            log: vec![measurement.describe(&from_name, &field.unit(target)?.name)],
                            counter: Some(measurement.label()),
                            ..InteractionOutcome::status(status)
                        }
                    }
                    _ => {
                        let measurement = field.measure_point(id, point)?;
                        InteractionOutcome {
                            log: vec![format!(
                                "Distance from {}'s unit leader point to ({:.2}, {:.2}) is {:.2}\".",
                                from_name, point.x, point.y, measurement.distance
                            )],
                            counter: Some(measurement.label()),
                            ..InteractionOutcome::status(status)
                        }
                    }
                };
                Ok(outcome)
            }
            InteractionMode::CheckingArc(id) => {
                let status = self.current_status(field)?;
                let mut outcome = InteractionOutcome::status(status);
                if let Some(target) = field.unit_at(point).filter(|t| *t != id) {
                    field.arc_of(id, target)?;
                    if let Some(event) = field.log.last() {
                        outcome.log.push(event.description.clone());
                    }
                }
                Ok(outcome)
            }
        }
    }

    /// Change the selection, resuming the new unit's open proposal if it has one
    ///
    /// A proposal left behind stays open until its unit is selected again.
    fn select(&mut self, field: &Battlefield, unit: Option<UnitId>) -> Result<InteractionOutcome> {
        let mut log = Vec::new();
        if let Some(previous) = self.selected.filter(|id| Some(*id) != unit) {
            if field.proposal(previous).is_some() {
                let name = &field.unit(previous)?.name;
                tracing::warn!("{} still has an uncommitted move", name);
                log.push(format!(
                    "Movement of {} is still pending; select it again to finalize or cancel.",
                    name
                ));
            }
        }

        self.selected = unit;
        self.mode = match unit.and_then(|id| field.proposal(id).map(|p| (id, p.phase))) {
            Some((id, ProposalPhase::Moving)) => InteractionMode::Moving(id),
            Some((id, ProposalPhase::Rotating)) => InteractionMode::Rotating(id),
            None => InteractionMode::Idle,
        };
        Ok(InteractionOutcome {
            log,
            preview: unit.and_then(|id| field.proposal(id)).map(|p| p.current_pose),
            ..InteractionOutcome::status(self.current_status(field)?)
        })
    }

    fn require_selection(&self) -> Result<UnitId> {
        self.selected.ok_or(TableError::NoSelection)
    }

    fn idle_status(&self, field: &Battlefield) -> String {
        match self.selected.and_then(|id| field.unit(id).ok()) {
            Some(unit) => format!("{} selected.", unit.name),
            None => "Ready.".to_string(),
        }
    }

    fn current_status(&self, field: &Battlefield) -> Result<String> {
        match self.mode {
            InteractionMode::Moving(id) => self.moving_status(field, ProposalHandle::for_unit(id)),
            InteractionMode::Rotating(id) => Ok(format!("Rotating {}.", field.unit(id)?.name)),
            InteractionMode::Aligning(id, _) => Ok(format!("Aligning {}.", field.unit(id)?.name)),
            InteractionMode::CheckingDistance(id) => {
                Ok(format!("Checking distance from {}.", field.unit(id)?.name))
            }
            InteractionMode::CheckingArc(id) => {
                Ok(format!("Checking arcs from {}.", field.unit(id)?.name))
            }
            InteractionMode::Idle => Ok(self.idle_status(field)),
        }
    }

    fn moving_status(&self, field: &Battlefield, handle: ProposalHandle) -> Result<String> {
        let id = handle.unit_id();
        let name = &field.unit(id)?.name;
        let axis = field
            .proposal(id)
            .and_then(|p| p.restricted_axis.as_ref())
            .map(|axis| axis.name.as_str());
        Ok(match axis {
            Some(axis) => format!("Moving {} {}.", name, axis),
            None => format!("Moving {}.", name),
        })
    }

    fn distance_counter(&self, field: &Battlefield, id: UnitId) -> Option<String> {
        field
            .proposal(id)
            .map(|p| format!("{:.1}\"", p.displacement()))
    }

    fn angle_counter(&self, field: &Battlefield, id: UnitId) -> Option<String> {
        field.proposal(id).map(|p| format!("{:.1} °", p.turned_by()))
    }
}
