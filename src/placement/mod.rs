mod axial;
mod beam;

pub use axial::AxialPlacement;
pub use beam::BeamPlacement;

use crate::math::{Point3, UnitQuaternion, Vector3};

/// Endpoints closer than this (after offsets) make a member degenerate.
pub const DEGENERACY_EPSILON: f64 = 1e-3; // mm

/// World-space offsets applied to the two member endpoints before any
/// placement math runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndOffsets {
    pub start: Vector3,
    pub end: Vector3,
}

/// Right-handed orthonormal frame: z along the member axis, y the section
/// depth ("up") direction, x the section width direction.
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

/// Datum convention for beam placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Reference points lie on the member centerline.
    #[default]
    Centerline,
    /// Reference points lie on the section's top face.
    TopAligned,
}

/// Where and how a member sits in world space.
///
/// `degenerate` is set instead of raising when the adjusted endpoints
/// (near-)coincide; callers must reject such members before meshing.
#[derive(Debug, Clone, Copy)]
pub struct PlacementResult {
    pub center: Point3,
    pub length: f64,
    /// Unit axis direction (zero when degenerate).
    pub direction: Vector3,
    pub rotation: UnitQuaternion,
    /// Full section frame; only beam placement provides one.
    pub basis: Option<Basis>,
    pub degenerate: bool,
}

impl PlacementResult {
    pub(crate) fn degenerate_at(center: Point3) -> Self {
        Self {
            center,
            length: 0.0,
            direction: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            basis: None,
            degenerate: true,
        }
    }
}
