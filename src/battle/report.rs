//! Movement reports: what a committed move did, in table terms

use serde::{Deserialize, Serialize};

use crate::battle::constants::{FORWARD_AXIS, SIDEWAYS_AXIS};
use crate::battle::movement::RestrictedAxis;
use crate::battle::units::Pose;

/// Measured outcome of a committed move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementReport {
    pub distance: f64,
    pub direction_label: String,
    pub rotation_degrees: f64,
    pub rotation_direction: String,
}

/// How a report should be announced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Moved,
    Rotated,
    MovedAndRotated,
}

/// Fold an angular difference into [0, 180]
pub fn fold_rotation(delta: f64) -> f64 {
    let raw = delta.abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

impl MovementReport {
    /// Compare start and end poses under an optional axis restriction
    ///
    /// With an axis the distance is the magnitude of the end point's axis
    /// parameter, and its sign picks the direction label.
    pub fn from_poses(start: &Pose, end: &Pose, axis: Option<&RestrictedAxis>) -> Self {
        let (distance, direction_label) = match axis {
            None => (
                start.position().distance(&end.position()),
                "freely".to_string(),
            ),
            Some(axis) => {
                let t = axis.parameter(end.position());
                (t.abs(), axis_direction_label(&axis.name, t))
            }
        };

        let delta = end.rotation() - start.rotation();
        let rotation_direction = if delta < 0.0 { "left" } else { "right" };

        Self {
            distance,
            direction_label,
            rotation_degrees: fold_rotation(delta),
            rotation_direction: rotation_direction.to_string(),
        }
    }

    /// `None` when neither distance nor rotation exceeds `epsilon`
    pub fn kind(&self, epsilon: f64) -> Option<ReportKind> {
        match (self.distance > epsilon, self.rotation_degrees > epsilon) {
            (true, true) => Some(ReportKind::MovedAndRotated),
            (true, false) => Some(ReportKind::Moved),
            (false, true) => Some(ReportKind::Rotated),
            (false, false) => None,
        }
    }

    /// Log line for the move, or `None` if nothing worth reporting happened
    pub fn summary(&self, unit_name: &str, epsilon: f64) -> Option<String> {
        let moved = format!("moved {:.1}\" {}", self.distance, self.direction_label);
        let rotated = format!(
            "rotated {:.1}° {}",
            self.rotation_degrees, self.rotation_direction
        );
        let text = match self.kind(epsilon)? {
            ReportKind::Moved => moved,
            ReportKind::Rotated => rotated,
            ReportKind::MovedAndRotated => format!("{} and {}", moved, rotated),
        };
        Some(format!("{} {}.", unit_name, text))
    }
}

fn axis_direction_label(name: &str, t: f64) -> String {
    match name {
        FORWARD_AXIS if t >= 0.0 => "forward".to_string(),
        FORWARD_AXIS => "backward".to_string(),
        SIDEWAYS_AXIS if t > 0.0 => "to the left".to_string(),
        SIDEWAYS_AXIS if t < 0.0 => "to the right".to_string(),
        SIDEWAYS_AXIS => "sideways".to_string(),
        other => format!("along {}", other.to_lowercase()),
    }
}
