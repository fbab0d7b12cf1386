use crate::error::{ContractViolation, Result};
use crate::math::Point3;
use crate::meshing::{BuildTaperedMesh, MeshBuffers, MeshParams};
use crate::placement::{
    AxialPlacement, BeamPlacement, EndOffsets, PlacementMode, PlacementResult, DEGENERACY_EPSILON,
};
use crate::profile::{HaunchSpec, NamedSection};
use crate::segment::{ResolveBoundaries, SegmentationParams};

/// Which placement calculator positions the member.
#[derive(Debug, Clone, Copy)]
pub enum PlacementKind {
    /// Axis plus roll only (braces, piles).
    Axial,
    /// Full section frame with datum handling (beams, columns).
    Beam {
        mode: PlacementMode,
        section_height: f64,
    },
}

/// Everything the model loader supplies for one member.
///
/// Profiles arrive already resolved from the shape library; this engine
/// depends only on the profile values, not the identifier scheme.
#[derive(Debug, Clone)]
pub struct MemberInput {
    pub sections: Vec<NamedSection>,
    pub haunch: HaunchSpec,
    pub start: Point3,
    pub end: Point3,
    pub offsets: EndOffsets,
    /// Roll about the member axis in radians.
    pub roll: f64,
    pub placement: PlacementKind,
}

/// A generated member: local-space mesh buffers plus the world transform
/// (center + rotation) to place them.
#[derive(Debug, Clone)]
pub struct MemberMesh {
    pub buffers: MeshBuffers,
    pub placement: PlacementResult,
}

/// One-call member generation: placement, boundary resolution and mesh
/// build. A member's mesh is either fully produced or not produced at
/// all; callers catch the error per member, log, and skip it without
/// aborting the whole model load.
pub struct GenerateMember {
    input: MemberInput,
    segmentation: SegmentationParams,
    meshing: MeshParams,
}

impl GenerateMember {
    /// Creates a new `GenerateMember` operation with default parameters.
    #[must_use]
    pub fn new(input: MemberInput) -> Self {
        Self {
            input,
            segmentation: SegmentationParams::default(),
            meshing: MeshParams::default(),
        }
    }

    /// Overrides the segmentation parameters.
    #[must_use]
    pub fn with_segmentation(mut self, params: SegmentationParams) -> Self {
        self.segmentation = params;
        self
    }

    /// Overrides the meshing parameters.
    #[must_use]
    pub fn with_meshing(mut self, params: MeshParams) -> Self {
        self.meshing = params;
        self
    }

    /// Executes the full generation pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::DegenerateMember`] when the adjusted
    /// endpoints (near-)coincide, plus any resolver or mesh-builder
    /// contract error.
    pub fn execute(&self) -> Result<MemberMesh> {
        let input = &self.input;
        let placement = match input.placement {
            PlacementKind::Axial => {
                AxialPlacement::new(input.start, input.end, input.offsets, input.roll).execute()
            }
            PlacementKind::Beam {
                mode,
                section_height,
            } => BeamPlacement::new(
                input.start,
                input.end,
                input.offsets,
                input.roll,
                mode,
                section_height,
            )
            .execute(),
        };
        if placement.degenerate {
            return Err(ContractViolation::DegenerateMember {
                length: placement.length,
                epsilon: DEGENERACY_EPSILON,
            }
            .into());
        }

        let boundaries = ResolveBoundaries::new(
            input.sections.clone(),
            placement.length,
            input.haunch,
            self.segmentation,
        )
        .execute()?;

        let buffers = BuildTaperedMesh::new(boundaries, placement.length, self.meshing).execute()?;

        Ok(MemberMesh { buffers, placement })
    }
}
