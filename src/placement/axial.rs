use crate::math::rotation::{from_axis_angle, rotation_between};
use crate::math::vector::midpoint;
use crate::math::{Point3, Vector3};

use super::{EndOffsets, PlacementResult, DEGENERACY_EPSILON};

/// Computes center, length, direction and rotation for a member whose
/// orientation is fully determined by its axis plus a roll angle
/// (braces, piles, generic linear members).
///
/// The canonical +z axis is aligned onto the member direction with a
/// shortest-arc rotation, then the roll is applied about the direction.
pub struct AxialPlacement {
    start: Point3,
    end: Point3,
    offsets: EndOffsets,
    roll: f64,
}

impl AxialPlacement {
    /// Creates a new `AxialPlacement` operation.
    ///
    /// * `roll` - Rotation about the member axis in radians.
    #[must_use]
    pub fn new(start: Point3, end: Point3, offsets: EndOffsets, roll: f64) -> Self {
        Self {
            start,
            end,
            offsets,
            roll,
        }
    }

    /// Executes the placement computation.
    ///
    /// Near-coincident adjusted endpoints produce a flagged degenerate
    /// result rather than an error; callers must reject those members.
    #[must_use]
    pub fn execute(&self) -> PlacementResult {
        let a = self.start + self.offsets.start;
        let b = self.end + self.offsets.end;
        let center = midpoint(&a, &b);

        let axis = b - a;
        let length = axis.norm();
        if length < DEGENERACY_EPSILON {
            return PlacementResult::degenerate_at(center);
        }
        let direction = axis / length;

        let align = rotation_between(&Vector3::z(), &direction);
        let rotation = if self.roll.abs() > 0.0 {
            from_axis_angle(&direction, self.roll) * align
        } else {
            align
        };

        PlacementResult {
            center,
            length,
            direction,
            rotation,
            basis: None,
            degenerate: false,
        }
    }
}
