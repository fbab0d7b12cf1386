use super::{Point2, Point3, Vector3, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(
        f64::midpoint(a.x, b.x),
        f64::midpoint(a.y, b.y),
        f64::midpoint(a.z, b.z),
    )
}

/// Normalizes a vector, mapping the zero vector to the zero vector.
///
/// Degenerate input is resolved locally by convention rather than raised
/// as an error; callers that need to reject zero directions check the
/// result's norm.
#[must_use]
pub fn normalize_or_zero(v: &Vector3) -> Vector3 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector3::zeros()
    } else {
        v / len
    }
}

/// Linear interpolation between two 2D points, `t` in `[0, 1]`.
#[must_use]
pub fn lerp_point2(a: &Point2, b: &Point2, t: f64) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Linear interpolation between two 3D points, `t` in `[0, 1]`.
#[must_use]
pub fn lerp_point3(a: &Point3, b: &Point3, t: f64) -> Point3 {
    Point3::new(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        a.z + (b.z - a.z) * t,
    )
}
