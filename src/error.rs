use thiserror::Error;

/// Top-level error type for the tapermesh geometry engine.
#[derive(Debug, Error)]
pub enum TaperMeshError {
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

/// Malformed input detected synchronously. No degraded mesh is produced:
/// a corrupted topology would silently misrepresent engineering geometry.
///
/// Callers should catch this per member, log, and skip that member
/// without aborting the whole model load.
#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("member has no named sections")]
    NoSections,

    #[error("member length {0} mm is not positive")]
    NonPositiveLength(f64),

    #[error("member endpoints are coincident (length {length} mm < {epsilon} mm)")]
    DegenerateMember { length: f64, epsilon: f64 },

    #[error("member length {length} mm is too short for section transitions (minimum {minimum} mm)")]
    MemberTooShort { length: f64, minimum: f64 },

    #[error("mesh needs at least 2 segment boundaries, got {0}")]
    TooFewBoundaries(usize),

    #[error("outer contour needs at least 3 vertices, got {0}")]
    ProfileTooSmall(usize),

    #[error("hole {index} needs at least 3 vertices, got {vertices}")]
    HoleTooSmall { index: usize, vertices: usize },

    #[error("invalid {shape} dimensions: {detail}")]
    InvalidShapeDimensions { shape: &'static str, detail: String },

    #[error("outer contour vertex counts differ between adjacent boundaries: {first} vs {second}")]
    OuterVertexCountMismatch { first: usize, second: usize },

    #[error("hole counts differ between adjacent boundaries: {first} vs {second}")]
    HoleCountMismatch { first: usize, second: usize },

    #[error("hole {index} vertex counts differ between adjacent boundaries: {first} vs {second}")]
    HoleVertexCountMismatch {
        index: usize,
        first: usize,
        second: usize,
    },

    #[error("segment boundaries are not strictly ascending near position {0}")]
    NonAscendingBoundaries(f64),
}

/// Failures inside the constrained Delaunay end-cap triangulation.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("CDT insert: {0}")]
    Insertion(String),

    #[error("constraint loop needs at least 3 points, got {0}")]
    DegenerateLoop(usize),
}

/// Convenience type alias for results using [`TaperMeshError`].
pub type Result<T> = std::result::Result<T, TaperMeshError>;
