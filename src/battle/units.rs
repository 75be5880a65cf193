//! Units on the table: a rectangular base with a pose
//!
//! A unit's pose only changes when a movement proposal is committed.

use serde::{Deserialize, Serialize};

use crate::battle::constants::MM_TO_IN;
use crate::core::error::{Result, TableError};
use crate::core::types::UnitId;
use crate::geometry::{normalize_degrees, OrientedRect, Point};

/// Position of a base's center and its heading
///
/// Rotation is clockwise in degrees with 0 facing north (decreasing Y),
/// always stored in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseFields")]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    rotation_degrees: f64,
}

/// Wire form of `Pose`; rotation is normalized on the way in
#[derive(Deserialize)]
struct PoseFields {
    x: f64,
    y: f64,
    rotation_degrees: f64,
}

impl From<PoseFields> for Pose {
    fn from(fields: PoseFields) -> Self {
        Pose::new(fields.x, fields.y, fields.rotation_degrees)
    }
}

impl Pose {
    pub fn new(x: f64, y: f64, rotation_degrees: f64) -> Self {
        Self {
            x,
            y,
            rotation_degrees: normalize_degrees(rotation_degrees),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_degrees = normalize_degrees(degrees);
    }

    /// Map a point from the base's local frame into table coordinates
    pub fn to_world(&self, local: Point) -> Point {
        local.rotated(self.rotation_degrees) + self.position()
    }

    /// Rotate a local direction into table coordinates (no translation)
    pub fn direction_to_world(&self, local: Point) -> Point {
        local.rotated(self.rotation_degrees)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Base dimensions in table inches; depth runs front to back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FootprintFields")]
pub struct Footprint {
    width: f64,
    depth: f64,
}

/// Wire form of `Footprint`; goes through the same validation as `Footprint::new`
#[derive(Deserialize)]
struct FootprintFields {
    width: f64,
    depth: f64,
}

impl TryFrom<FootprintFields> for Footprint {
    type Error = TableError;

    fn try_from(fields: FootprintFields) -> Result<Self> {
        Footprint::new(fields.width, fields.depth)
    }
}

impl Footprint {
    /// Validate and create a footprint
    ///
    /// A single zero side is accepted (measurement treats it as a line);
    /// two zero sides or any negative or non-finite side is rejected.
    pub fn new(width: f64, depth: f64) -> Result<Self> {
        if !width.is_finite() || !depth.is_finite() || width < 0.0 || depth < 0.0 {
            return Err(TableError::InvalidFootprint { width, depth });
        }
        if width == 0.0 && depth == 0.0 {
            return Err(TableError::DegenerateFootprint { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Base sizes are quoted in millimeters
    pub fn from_millimeters(width_mm: f64, depth_mm: f64) -> Result<Self> {
        Self::new(width_mm * MM_TO_IN, depth_mm * MM_TO_IN)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }
}

/// A unit on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub(crate) pose: Pose,
    footprint: Footprint,
}

impl Unit {
    pub fn new(name: impl Into<String>, footprint: Footprint, pose: Pose) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            pose,
            footprint,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// World-space base rectangle for the committed pose
    pub fn rect(&self) -> OrientedRect {
        OrientedRect::new(
            self.pose.position(),
            self.footprint.width,
            self.footprint.depth,
            self.pose.rotation(),
        )
    }
}
