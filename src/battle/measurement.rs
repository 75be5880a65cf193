//! Distance checks from a unit's leader point
//!
//! Charges and shooting are measured from the middle of the measuring unit's
//! front edge to the nearest point of the target base.

use serde::{Deserialize, Serialize};

use crate::battle::arcs::reference_point;
use crate::battle::units::Unit;
use crate::geometry::{closest_point, Point};

/// Result of a distance check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub from: Point,
    pub to: Point,
    pub distance: f64,
}

impl Measurement {
    /// Log line for a unit-to-unit check
    pub fn describe(&self, from_name: &str, target_name: &str) -> String {
        format!(
            "Distance from {}'s unit leader point to the closest point of {} is {:.2}\".",
            from_name, target_name, self.distance
        )
    }

    /// Short label drawn next to the measuring line
    pub fn label(&self) -> String {
        format!("{:.1}\"", self.distance)
    }
}

/// Leader point of `from` to the closest point of `target`'s base
pub fn measure_to_unit(from: &Unit, target: &Unit) -> Measurement {
    let origin = reference_point(&from.pose(), &from.footprint());
    let (to, distance) = closest_point(origin, &target.rect());
    Measurement {
        from: origin,
        to,
        distance,
    }
}

/// Leader point of `from` to an arbitrary table point
pub fn measure_to_point(from: &Unit, point: Point) -> Measurement {
    let origin = reference_point(&from.pose(), &from.footprint());
    Measurement {
        from: origin,
        to: point,
        distance: origin.distance(&point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::units::{Footprint, Pose};

    fn unit(name: &str, x: f64, y: f64, rotation: f64) -> Unit {
        Unit::new(
            name,
            Footprint::new(10.0, 4.0).unwrap(),
            Pose::new(x, y, rotation),
        )
    }

    #[test]
    fn test_measure_to_unit_in_front() {
        let shooter = unit("Archers", 0.0, 20.0, 0.0);
        let target = unit("Spearmen", 0.0, 0.0, 0.0);
        let m = measure_to_unit(&shooter, &target);
        assert_eq!(m.from, Point::new(0.0, 18.0));
        assert_eq!(m.to, Point::new(0.0, 2.0));
        assert_eq!(m.distance, 16.0);
    }

    #[test]
    fn test_measure_to_point() {
        let shooter = unit("Archers", 0.0, 0.0, 0.0);
        let m = measure_to_point(&shooter, Point::new(3.0, 2.0));
        assert_eq!(m.distance, 5.0);
        assert_eq!(m.label(), "5.0\"");
    }

    #[test]
    fn test_describe() {
        let m = Measurement {
            from: Point::ZERO,
            to: Point::new(0.0, 12.346),
            distance: 12.346,
        };
        assert_eq!(
            m.describe("Ax Horde", "Sea Guard"),
            "Distance from Ax Horde's unit leader point to the closest point of Sea Guard is 12.35\"."
        );
    }
}
