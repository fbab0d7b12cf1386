mod resolver;

pub use resolver::ResolveBoundaries;

use crate::profile::CrossSectionProfile;

/// A cross-section pinned at an axial position (mm from the member
/// start). Two boundaries at near-equal positions with different
/// profiles encode a drop discontinuity.
#[derive(Debug, Clone)]
pub struct SegmentBoundary {
    pub position: f64,
    pub profile: CrossSectionProfile,
}

impl SegmentBoundary {
    #[must_use]
    pub fn new(position: f64, profile: CrossSectionProfile) -> Self {
        Self { position, profile }
    }
}

/// Parameters controlling boundary resolution.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationParams {
    /// Axial spread of a drop discontinuity pair (mm). The two boundaries
    /// sit at the nominal position ± half this value.
    pub drop_epsilon: f64,
    /// Haunch region size as a fraction of member length, used when the
    /// haunch spec gives no explicit length.
    pub haunch_fraction: f64,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            drop_epsilon: 0.1,
            haunch_fraction: 0.2,
        }
    }
}
