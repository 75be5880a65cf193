//! Aligning a unit's heading to another unit's facing

use serde::{Deserialize, Serialize};

use crate::battle::units::Pose;
use crate::geometry::normalize_degrees;

/// Which side of the target the aligned unit should square up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Face the target's front, i.e. turn to face it head on
    Front,
    /// Face the same way as the target, as when contacting its rear
    Rear,
    LeftFlank,
    RightFlank,
}

impl Alignment {
    pub fn label(&self) -> &'static str {
        match self {
            Alignment::Front => "front",
            Alignment::Rear => "rear",
            Alignment::LeftFlank => "left flank",
            Alignment::RightFlank => "right flank",
        }
    }
}

/// Heading that squares a unit up to the given side of `target`
pub fn aligned_rotation(target: &Pose, alignment: Alignment) -> f64 {
    let offset = match alignment {
        Alignment::Front => 180.0,
        Alignment::Rear => 0.0,
        Alignment::LeftFlank => 90.0,
        Alignment::RightFlank => -90.0,
    };
    normalize_degrees(target.rotation() + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_rotations() {
        let target = Pose::new(0.0, 0.0, 173.0);
        assert_eq!(aligned_rotation(&target, Alignment::Front), 353.0);
        assert_eq!(aligned_rotation(&target, Alignment::Rear), 173.0);
        assert_eq!(aligned_rotation(&target, Alignment::LeftFlank), 263.0);
        assert_eq!(aligned_rotation(&target, Alignment::RightFlank), 83.0);
    }

    #[test]
    fn test_alignment_wraps() {
        let target = Pose::new(0.0, 0.0, 300.0);
        assert_eq!(aligned_rotation(&target, Alignment::Front), 120.0);
        let north = Pose::new(0.0, 0.0, 0.0);
        assert_eq!(aligned_rotation(&north, Alignment::RightFlank), 270.0);
    }
}
