mod shapes;

pub use shapes::{ProfileKind, DEFAULT_CIRCLE_SEGMENTS};

use crate::error::{ContractViolation, Result};
use crate::math::polygon::{wound_ccw, wound_cw};
use crate::math::Point2;

/// A 2D cross-section shape: one simple outer contour plus any number of
/// interior holes.
///
/// Coordinates are section-local millimetres, x to the right and y up
/// when looking along the member axis. Construction normalizes winding
/// (outer counter-clockwise, holes clockwise) so downstream wall and cap
/// generation can rely on orientation. Holes must lie fully inside the
/// outer contour and must not overlap each other; that containment is the
/// caller's contract and is not re-verified here.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionProfile {
    outer: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
}

impl CrossSectionProfile {
    /// Creates a profile from an outer contour and hole loops.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ProfileTooSmall`] if the outer contour
    /// has fewer than 3 vertices, or [`ContractViolation::HoleTooSmall`]
    /// for an undersized hole loop.
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Result<Self> {
        if outer.len() < 3 {
            return Err(ContractViolation::ProfileTooSmall(outer.len()).into());
        }
        for (index, hole) in holes.iter().enumerate() {
            if hole.len() < 3 {
                return Err(ContractViolation::HoleTooSmall {
                    index,
                    vertices: hole.len(),
                }
                .into());
            }
        }
        Ok(Self {
            outer: wound_ccw(outer),
            holes: holes.into_iter().map(wound_cw).collect(),
        })
    }

    /// Creates a solid profile (no holes).
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ProfileTooSmall`] if the contour has
    /// fewer than 3 vertices.
    pub fn solid(outer: Vec<Point2>) -> Result<Self> {
        Self::new(outer, Vec::new())
    }

    /// The outer contour, wound counter-clockwise.
    #[must_use]
    pub fn outer(&self) -> &[Point2] {
        &self.outer
    }

    /// The hole loops, each wound clockwise.
    #[must_use]
    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.holes
    }

    /// True if both profiles have identical contours and holes.
    ///
    /// Used by the mesh builder to skip subdivision across uniform
    /// segments, where interpolation is constant.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self == other
    }
}

/// Which end of the member a named section describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPosition {
    Start,
    Center,
    End,
}

/// A cross-section profile pinned to a position along the member.
#[derive(Debug, Clone)]
pub struct NamedSection {
    pub position: SectionPosition,
    pub profile: CrossSectionProfile,
}

impl NamedSection {
    #[must_use]
    pub fn new(position: SectionPosition, profile: CrossSectionProfile) -> Self {
        Self { position, profile }
    }
}

/// Transition kind at a haunch boundary: smooth taper or abrupt step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionKind {
    #[default]
    Slope,
    Drop,
}

/// Haunch (joint) region sizes and transition kinds for a member.
///
/// `None` lengths fall back to the resolver's default fraction of the
/// member length.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaunchSpec {
    pub start_length: Option<f64>,
    pub end_length: Option<f64>,
    pub start_kind: TransitionKind,
    pub end_kind: TransitionKind,
}
