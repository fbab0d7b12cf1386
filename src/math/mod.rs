pub mod polygon;
pub mod rotation;
pub mod vector;

/// 2D point type (section-local coordinates, mm).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (world coordinates, mm).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Raw (possibly non-unit) quaternion.
pub type Quaternion = nalgebra::Quaternion<f64>;

/// Unit quaternion representing a rotation.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
