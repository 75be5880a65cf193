//! Oriented rectangles built from a center, a size and a rotation

use geo::{Coord, Intersects, LineString, Polygon};
use serde::{Deserialize, Serialize};

use super::primitives::Point;

/// Corner of a rectangle, in the fixed TL, TR, BR, BL order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }
}

/// Rectangle in world coordinates, derived on demand from a pose and size
///
/// "Top" is the front edge in the rectangle's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    corners: [Point; 4],
}

impl OrientedRect {
    /// Map the local corners `(±width/2, ±depth/2)` through rotation, then translation
    pub fn new(center: Point, width: f64, depth: f64, rotation_degrees: f64) -> Self {
        let (hw, hd) = (width / 2.0, depth / 2.0);
        let local = [
            Point::new(-hw, -hd),
            Point::new(hw, -hd),
            Point::new(hw, hd),
            Point::new(-hw, hd),
        ];
        Self {
            corners: local.map(|p| p.rotated(rotation_degrees) + center),
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    pub fn corner(&self, corner: Corner) -> Point {
        self.corners[corner.index()]
    }

    pub fn top_left(&self) -> Point {
        self.corner(Corner::TopLeft)
    }

    pub fn top_right(&self) -> Point {
        self.corner(Corner::TopRight)
    }

    pub fn bottom_right(&self) -> Point {
        self.corner(Corner::BottomRight)
    }

    pub fn bottom_left(&self) -> Point {
        self.corner(Corner::BottomLeft)
    }

    /// True when either side has zero length
    pub fn is_degenerate(&self) -> bool {
        (self.top_right() - self.top_left()).is_zero()
            || (self.bottom_left() - self.top_left()).is_zero()
    }

    /// Edge-inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        polygon_contains(&self.corners, point)
    }
}

/// Closed point-in-polygon test: points on an edge or vertex count as inside
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let ring: Vec<Coord<f64>> = vertices.iter().map(|p| Coord::from(*p)).collect();
    let polygon = Polygon::new(LineString::from(ring), vec![]);
    polygon.intersects(&Coord::from(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_axis_aligned_corners() {
        let rect = OrientedRect::new(Point::ZERO, 10.0, 4.0, 0.0);
        assert_eq!(rect.top_left(), Point::new(-5.0, -2.0));
        assert_eq!(rect.top_right(), Point::new(5.0, -2.0));
        assert_eq!(rect.bottom_right(), Point::new(5.0, 2.0));
        assert_eq!(rect.bottom_left(), Point::new(-5.0, 2.0));
    }

    #[test]
    fn test_rotated_and_translated_corners() {
        // Facing east: the front edge becomes the right-hand side
        let rect = OrientedRect::new(Point::new(10.0, 20.0), 10.0, 4.0, 90.0);
        assert!(approx(rect.top_left(), Point::new(12.0, 15.0)));
        assert!(approx(rect.top_right(), Point::new(12.0, 25.0)));
        assert!(approx(rect.bottom_right(), Point::new(8.0, 25.0)));
        assert!(approx(rect.bottom_left(), Point::new(8.0, 15.0)));
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let rect = OrientedRect::new(Point::ZERO, 10.0, 4.0, 0.0);
        assert!(rect.contains(Point::ZERO));
        assert!(rect.contains(Point::new(5.0, 0.0)));
        assert!(rect.contains(Point::new(-5.0, -2.0)));
        assert!(!rect.contains(Point::new(5.1, 0.0)));
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(!OrientedRect::new(Point::ZERO, 10.0, 4.0, 30.0).is_degenerate());
        assert!(OrientedRect::new(Point::ZERO, 10.0, 0.0, 0.0).is_degenerate());
        assert!(OrientedRect::new(Point::ZERO, 0.0, 4.0, 0.0).is_degenerate());
    }
}
