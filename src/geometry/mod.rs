//! Plane geometry for the table surface
//!
//! Table coordinates are in inches with Y growing towards the near edge,
//! so a positive rotation turns clockwise as seen from above.

pub mod closest;
pub mod primitives;
pub mod rect;

pub use closest::closest_point;
pub use primitives::{normalize_degrees, Point, Vector};
pub use rect::{Corner, OrientedRect};
