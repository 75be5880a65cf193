//! Facing arcs and the unit leader point
//!
//! Each arc is a quadrilateral on one edge of the base, opened outwards along
//! the base's diagonals up to a fixed lookout distance. Together the four arcs
//! cover the table around a base; exact diagonals belong to two arcs at once.

use serde::{Deserialize, Serialize};

use crate::battle::constants::DEFAULT_LOOKOUT_DISTANCE;
use crate::battle::units::{Footprint, Pose};
use crate::geometry::rect::polygon_contains;
use crate::geometry::{OrientedRect, Point};

/// Arc polygon vertices in table coordinates
pub type Polygon4 = [Point; 4];

/// Directional zone around a base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacingArc {
    Front,
    Rear,
    Left,
    Right,
}

impl FacingArc {
    /// Classification priority when a point lies on a shared boundary
    pub const PRIORITY: [FacingArc; 4] = [
        FacingArc::Front,
        FacingArc::Rear,
        FacingArc::Left,
        FacingArc::Right,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FacingArc::Front => "front",
            FacingArc::Rear => "rear",
            FacingArc::Left => "left flank",
            FacingArc::Right => "right flank",
        }
    }
}

/// Base corners in TL, TR, BR, BL order
pub fn corners(pose: &Pose, footprint: &Footprint) -> [Point; 4] {
    OrientedRect::new(
        pose.position(),
        footprint.width(),
        footprint.depth(),
        pose.rotation(),
    )
    .corners()
}

/// Midpoint of the front edge, the point all measurements start from
pub fn reference_point(pose: &Pose, footprint: &Footprint) -> Point {
    pose.to_world(Point::new(0.0, -footprint.depth() / 2.0))
}

/// Arc polygon with the default lookout distance
pub fn facing_arc(pose: &Pose, footprint: &Footprint, which: FacingArc) -> Polygon4 {
    facing_arc_with_lookout(pose, footprint, which, DEFAULT_LOOKOUT_DISTANCE)
}

/// Arc polygon: the two corners of one edge plus both pushed out diagonally by `lookout`
pub fn facing_arc_with_lookout(
    pose: &Pose,
    footprint: &Footprint,
    which: FacingArc,
    lookout: f64,
) -> Polygon4 {
    let (hw, hd) = (footprint.width() / 2.0, footprint.depth() / 2.0);
    let tl = Point::new(-hw, -hd);
    let tr = Point::new(hw, -hd);
    let br = Point::new(hw, hd);
    let bl = Point::new(-hw, hd);

    let out_tl = tl + Point::new(-lookout, -lookout);
    let out_tr = tr + Point::new(lookout, -lookout);
    let out_br = br + Point::new(lookout, lookout);
    let out_bl = bl + Point::new(-lookout, lookout);

    let local = match which {
        FacingArc::Front => [tl, tr, out_tr, out_tl],
        FacingArc::Rear => [br, bl, out_bl, out_br],
        FacingArc::Left => [bl, tl, out_tl, out_bl],
        FacingArc::Right => [tr, br, out_br, out_tr],
    };
    local.map(|p| pose.to_world(p))
}

/// Which arc of the target contains the observer's point, if any
///
/// Arcs are tested in priority order with edge-inclusive containment. Points
/// beyond the lookout distance, or inside the target's own base, fall in no
/// arc. Callers must not classify a unit against itself.
pub fn determine_arc(
    observer_point: Point,
    target_pose: &Pose,
    target_footprint: &Footprint,
) -> Option<FacingArc> {
    determine_arc_with_lookout(
        observer_point,
        target_pose,
        target_footprint,
        DEFAULT_LOOKOUT_DISTANCE,
    )
}

pub fn determine_arc_with_lookout(
    observer_point: Point,
    target_pose: &Pose,
    target_footprint: &Footprint,
    lookout: f64,
) -> Option<FacingArc> {
    FacingArc::PRIORITY.into_iter().find(|&which| {
        let polygon = facing_arc_with_lookout(target_pose, target_footprint, which, lookout);
        polygon_contains(&polygon, observer_point)
    })
}
