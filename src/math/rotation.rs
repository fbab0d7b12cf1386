use super::{Quaternion, UnitQuaternion, Vector3, TOLERANCE};
use crate::math::vector::normalize_or_zero;

/// Shortest-arc rotation taking `from` onto `to`.
///
/// Zero-length inputs yield the identity. Near-antiparallel inputs are
/// handled explicitly: the half-vector construction collapses there, so
/// the rotation falls back to a half-turn about an arbitrary axis
/// orthogonal to `from`.
#[must_use]
pub fn rotation_between(from: &Vector3, to: &Vector3) -> UnitQuaternion {
    let f = normalize_or_zero(from);
    let t = normalize_or_zero(to);
    if f.norm() < TOLERANCE || t.norm() < TOLERANCE {
        return UnitQuaternion::identity();
    }

    let dot = f.dot(&t);
    if dot < -1.0 + 1e-9 {
        return from_axis_angle(&orthogonal_axis(&f), std::f64::consts::PI);
    }

    let axis = f.cross(&t);
    // w = 1 + dot encodes the half-angle; normalization finishes the job.
    UnitQuaternion::new_normalize(Quaternion::new(1.0 + dot, axis.x, axis.y, axis.z))
}

/// Rotation of `angle` radians about `axis` (need not be unit length).
///
/// A zero axis yields the identity.
#[must_use]
pub fn from_axis_angle(axis: &Vector3, angle: f64) -> UnitQuaternion {
    let a = normalize_or_zero(axis);
    if a.norm() < TOLERANCE {
        return UnitQuaternion::identity();
    }
    let half = angle * 0.5;
    let s = half.sin();
    UnitQuaternion::new_normalize(Quaternion::new(half.cos(), a.x * s, a.y * s, a.z * s))
}

/// Rotation mapping the canonical axes onto an orthonormal basis
/// `(x, y, z)` given as the columns of the rotation matrix.
///
/// Uses the trace method with three largest-diagonal branch cases so the
/// extraction stays stable when the trace is near zero (180-degree-ish
/// rotations).
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn from_basis(x: &Vector3, y: &Vector3, z: &Vector3) -> UnitQuaternion {
    let (m00, m01, m02) = (x.x, y.x, z.x);
    let (m10, m11, m12) = (x.y, y.y, z.y);
    let (m20, m21, m22) = (x.z, y.z, z.z);

    let trace = m00 + m11 + m22;
    let q = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        Quaternion::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
    } else if m00 > m11 && m00 > m22 {
        let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
        Quaternion::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
    } else if m11 > m22 {
        let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
        Quaternion::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
    } else {
        let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
        Quaternion::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
    };

    UnitQuaternion::new_normalize(q)
}

/// An arbitrary unit vector orthogonal to `v`.
///
/// Crosses with whichever canonical axis is least aligned with `v`.
#[must_use]
pub fn orthogonal_axis(v: &Vector3) -> Vector3 {
    let candidate = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normalize_or_zero(&v.cross(&candidate))
}
