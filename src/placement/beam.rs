use crate::math::rotation::{from_axis_angle, from_basis};
use crate::math::vector::midpoint;
use crate::math::{Point3, Vector3};

use super::{Basis, EndOffsets, PlacementMode, PlacementResult, DEGENERACY_EPSILON};

/// Below this projection length, the generic "project world-up off the
/// axis" derivation of the depth axis is ill-conditioned.
const VERTICAL_EPSILON: f64 = 1e-6;

/// Computes placement for a beam or column with a full section frame.
///
/// The frame keeps the section depth axis (y) as close as possible to
/// global vertical (+z), with a dedicated branch for near-vertical
/// members. The rotation is built directly from the orthonormal basis
/// rather than from a single from-to alignment, so the section "up" stays
/// consistent even for exactly vertical axes.
pub struct BeamPlacement {
    start: Point3,
    end: Point3,
    offsets: EndOffsets,
    roll: f64,
    mode: PlacementMode,
    section_height: f64,
}

impl BeamPlacement {
    /// Creates a new `BeamPlacement` operation.
    ///
    /// * `roll` - Rotation about the member axis in radians.
    /// * `section_height` - Section depth, used by the top-aligned datum.
    #[must_use]
    pub fn new(
        start: Point3,
        end: Point3,
        offsets: EndOffsets,
        roll: f64,
        mode: PlacementMode,
        section_height: f64,
    ) -> Self {
        Self {
            start,
            end,
            offsets,
            roll,
            mode,
            section_height,
        }
    }

    /// Executes the placement computation.
    ///
    /// With [`PlacementMode::TopAligned`], both endpoints are shifted by
    /// `-section_height / 2` along the section depth axis before center
    /// and length are computed, so the member's top face, not its
    /// centerline, passes through the reference points.
    #[must_use]
    pub fn execute(&self) -> PlacementResult {
        let mut a = self.start + self.offsets.start;
        let mut b = self.end + self.offsets.end;

        let axis = b - a;
        let length = axis.norm();
        if length < DEGENERACY_EPSILON {
            return PlacementResult::degenerate_at(midpoint(&a, &b));
        }
        let z = axis / length;

        let mut y = depth_axis(&z);
        let mut x = y.cross(&z);
        if self.roll.abs() > 0.0 {
            let roll = from_axis_angle(&z, self.roll);
            x = roll * x;
            y = roll * y;
        }

        if self.mode == PlacementMode::TopAligned {
            let shift = y * (-self.section_height / 2.0);
            a += shift;
            b += shift;
        }

        PlacementResult {
            center: midpoint(&a, &b),
            length,
            direction: z,
            rotation: from_basis(&x, &y, &z),
            basis: Some(Basis { x, y, z }),
            degenerate: false,
        }
    }
}

/// Section depth axis for a member axis `z`: world-up projected off the
/// axis, or a fixed +x-derived reference when the member is (near-)
/// vertical and that projection collapses.
fn depth_axis(z: &Vector3) -> Vector3 {
    let up = Vector3::z();
    let projected = up - z * up.dot(z);
    if projected.norm() > VERTICAL_EPSILON {
        return projected.normalize();
    }
    let reference = Vector3::x();
    (reference - z * reference.dot(z)).normalize()
}
