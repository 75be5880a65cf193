//! Closest point on an oriented rectangle
//!
//! Edge pairs are checked front/rear first, then left/right. A pair is only
//! used when the point's perpendicular foot lands inside the first edge of the
//! pair; otherwise the nearest corner wins.

use super::primitives::Point;
use super::rect::OrientedRect;

/// Foot of the perpendicular from `point` onto the line through `start` along `edge`
///
/// Returns the edge parameter `s` (0 at `start`, 1 at `start + edge`) and the foot.
/// Caller guarantees `edge` is non-zero.
fn project_onto_edge(point: Point, start: Point, edge: Point) -> (f64, Point) {
    let s = (point.dot(&edge) - start.dot(&edge)) / edge.dot(&edge);
    (s, start + edge * s)
}

/// Closer of the two feet on an opposite edge pair, first edge wins ties
fn closer_foot(point: Point, first: Point, second: Point) -> (Point, f64) {
    let d_first = point.distance(&first);
    let d_second = point.distance(&second);
    if d_second < d_first {
        (second, d_second)
    } else {
        (first, d_first)
    }
}

fn closest_corner(point: Point, rect: &OrientedRect) -> (Point, f64) {
    let candidates = [
        rect.top_left(),
        rect.bottom_left(),
        rect.bottom_right(),
        rect.top_right(),
    ];
    let mut best = (candidates[0], point.distance(&candidates[0]));
    for corner in &candidates[1..] {
        let d = point.distance(corner);
        if d < best.1 {
            best = (*corner, d);
        }
    }
    best
}

/// Nearest point of `rect` to `point` and the distance between them
///
/// Degenerate rectangles (a zero-length side) skip the edge projections and
/// go straight to the corner scan.
pub fn closest_point(point: Point, rect: &OrientedRect) -> (Point, f64) {
    if rect.is_degenerate() {
        return closest_corner(point, rect);
    }

    let (tl, tr, br, bl) = (
        rect.top_left(),
        rect.top_right(),
        rect.bottom_right(),
        rect.bottom_left(),
    );

    let (s_front, front_foot) = project_onto_edge(point, tl, tr - tl);
    if (0.0..=1.0).contains(&s_front) {
        let (_, rear_foot) = project_onto_edge(point, br, bl - br);
        return closer_foot(point, front_foot, rear_foot);
    }

    let (s_left, left_foot) = project_onto_edge(point, tl, bl - tl);
    if (0.0..=1.0).contains(&s_left) {
        let (_, right_foot) = project_onto_edge(point, tr, br - tr);
        return closer_foot(point, left_foot, right_foot);
    }

    closest_corner(point, rect)
}
