use crate::error::{ContractViolation, Result};
use crate::math::vector::{lerp_point2, normalize_or_zero};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::segment::SegmentBoundary;

use super::{MeshBuffers, MeshParams, TriangulateEndCap};

/// Builds a closed solid mesh for a member from its ordered segment
/// boundaries: lateral walls lofted between adjacent boundaries, hole
/// walls facing into the cavity, and two triangulated end caps.
///
/// Output is member-local: axis along +z, centered on the member
/// midpoint. Lateral normals are smooth (area-weighted vertex normals);
/// cap normals are flat, so the cap rim is a hard edge.
pub struct BuildTaperedMesh {
    boundaries: Vec<SegmentBoundary>,
    length: f64,
    params: MeshParams,
}

impl BuildTaperedMesh {
    /// Creates a new `BuildTaperedMesh` operation.
    ///
    /// * `length` - Member length in mm; boundaries must span `[0, length]`.
    #[must_use]
    pub fn new(boundaries: Vec<SegmentBoundary>, length: f64, params: MeshParams) -> Self {
        Self {
            boundaries,
            length,
            params,
        }
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] for fewer than 2 boundaries,
    /// non-ascending boundary positions, or adjacent boundaries whose
    /// outer contours or hole sets cannot be interpolated vertex for
    /// vertex. No partial mesh is produced on failure.
    pub fn execute(&self) -> Result<MeshBuffers> {
        self.validate()?;

        let mut mesh = MeshBuffers::default();

        // Outer walls, then one wall per hole (profiles share hole
        // cardinality, validated above).
        let hole_count = self.boundaries[0].profile.holes().len();
        self.build_loop_walls(&mut mesh, |p| p.outer());
        for hole in 0..hole_count {
            self.build_loop_walls(&mut mesh, move |p| &p.holes()[hole]);
        }

        smooth_normals(&mut mesh);

        // End caps close the solid; winding flipped so both face outward.
        // Depths follow the first and last boundary so the caps stay
        // attached to the wall rims even when the boundary list does not
        // span the full member length.
        let half = self.length / 2.0;
        let first = &self.boundaries[0];
        let last = &self.boundaries[self.boundaries.len() - 1];
        mesh.append(TriangulateEndCap::new(&first.profile, first.position - half, true).execute()?);
        mesh.append(TriangulateEndCap::new(&last.profile, last.position - half, false).execute()?);

        Ok(mesh)
    }

    fn validate(&self) -> Result<()> {
        if self.boundaries.len() < 2 {
            return Err(ContractViolation::TooFewBoundaries(self.boundaries.len()).into());
        }
        if self.length <= 0.0 {
            return Err(ContractViolation::NonPositiveLength(self.length).into());
        }
        for pair in self.boundaries.windows(2) {
            if pair[1].position <= pair[0].position {
                return Err(ContractViolation::NonAscendingBoundaries(pair[0].position).into());
            }
            let (a, b) = (&pair[0].profile, &pair[1].profile);
            if a.outer().len() != b.outer().len() {
                return Err(ContractViolation::OuterVertexCountMismatch {
                    first: a.outer().len(),
                    second: b.outer().len(),
                }
                .into());
            }
            if a.holes().len() != b.holes().len() {
                return Err(ContractViolation::HoleCountMismatch {
                    first: a.holes().len(),
                    second: b.holes().len(),
                }
                .into());
            }
            for (index, (ha, hb)) in a.holes().iter().zip(b.holes()).enumerate() {
                if ha.len() != hb.len() {
                    return Err(ContractViolation::HoleVertexCountMismatch {
                        index,
                        first: ha.len(),
                        second: hb.len(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Lofts one contour loop (outer or hole) along the whole member.
    ///
    /// Rings at shared boundaries are emitted once, so adjacent wall
    /// bands share vertices and edges. The outer loop is wound
    /// counter-clockwise and gets outward-facing quads; hole loops are
    /// stored clockwise, which makes the same emission face the cavity.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn build_loop_walls<'a, F>(&'a self, mesh: &mut MeshBuffers, loop_of: F)
    where
        F: Fn(&'a crate::profile::CrossSectionProfile) -> &'a [Point2],
    {
        let half = self.length / 2.0;
        let n = loop_of(&self.boundaries[0].profile).len();

        // Interpolated rings along the axis, shared at boundary junctions.
        let mut rings: Vec<(f64, Vec<Point2>)> = Vec::new();
        let first = &self.boundaries[0];
        rings.push((first.position, loop_of(&first.profile).to_vec()));

        for pair in self.boundaries.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let from_loop = loop_of(&from.profile);
            let to_loop = loop_of(&to.profile);
            // Constant interpolation needs no intermediate rings.
            let segments = if from.profile.same_geometry(&to.profile) {
                1
            } else {
                self.params.subdivisions.max(1)
            };
            for k in 1..=segments {
                let t = k as f64 / segments as f64;
                let position = from.position + (to.position - from.position) * t;
                let ring = from_loop
                    .iter()
                    .zip(to_loop)
                    .map(|(a, b)| lerp_point2(a, b, t))
                    .collect();
                rings.push((position, ring));
            }
        }

        let base = mesh.positions.len() as u32;
        for (position, ring) in &rings {
            let z = position - half;
            let v = position / self.length;
            let u = perimeter_fractions(ring);
            for (i, pt) in ring.iter().enumerate() {
                mesh.positions.push(Point3::new(pt.x, pt.y, z));
                mesh.normals.push(Vector3::zeros());
                mesh.uvs.push(Point2::new(u[i], v));
            }
        }

        let n = n as u32;
        for r in 0..rings.len() as u32 - 1 {
            for i in 0..n {
                let next = (i + 1) % n;
                let i00 = base + r * n + i;
                let i10 = base + r * n + next;
                let i01 = base + (r + 1) * n + i;
                let i11 = base + (r + 1) * n + next;
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            }
        }
    }
}

/// Cumulative perimeter fraction of each loop vertex, for the wall u
/// coordinate. Unevenly spaced contours (H, L sections) keep an
/// undistorted parameterization this way. Zero-perimeter rings fall back
/// to index fractions.
#[allow(clippy::cast_precision_loss)]
fn perimeter_fractions(ring: &[Point2]) -> Vec<f64> {
    let n = ring.len();
    let mut cumulative = Vec::with_capacity(n);
    let mut total = 0.0;
    for i in 0..n {
        cumulative.push(total);
        total += (ring[(i + 1) % n] - ring[i]).norm();
    }
    if total < TOLERANCE {
        return (0..n).map(|i| i as f64 / n as f64).collect();
    }
    cumulative.iter().map(|c| c / total).collect()
}

/// Accumulates area-weighted triangle normals onto the wall vertices and
/// normalizes. Runs before caps are appended, so only lateral surfaces
/// are smoothed.
fn smooth_normals(mesh: &mut MeshBuffers) {
    for tri in &mesh.indices {
        let a = mesh.positions[tri[0] as usize];
        let b = mesh.positions[tri[1] as usize];
        let c = mesh.positions[tri[2] as usize];
        let face = (b - a).cross(&(c - a));
        for &idx in tri {
            mesh.normals[idx as usize] += face;
        }
    }
    for normal in &mut mesh.normals {
        *normal = normalize_or_zero(normal);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profile::{CrossSectionProfile, ProfileKind};
    use std::collections::HashMap;

    fn rect_profile(width: f64, depth: f64) -> CrossSectionProfile {
        ProfileKind::Rectangle { depth, width }.build().unwrap()
    }

    fn box_profile() -> CrossSectionProfile {
        ProfileKind::Box {
            depth: 300.0,
            width: 300.0,
            wall_thickness: 20.0,
        }
        .build()
        .unwrap()
    }

    fn prism(profile: &CrossSectionProfile, length: f64, subdivisions: usize) -> MeshBuffers {
        BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(0.0, profile.clone()),
                SegmentBoundary::new(length, profile.clone()),
            ],
            length,
            MeshParams { subdivisions },
        )
        .execute()
        .unwrap()
    }

    /// Counts how many wall triangles share each undirected wall edge.
    fn wall_edge_sharing(mesh: &MeshBuffers, wall_triangles: usize) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::new();
        for tri in mesh.indices.iter().take(wall_triangles) {
            for k in 0..3 {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                let key = (a.min(b), a.max(b));
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn straight_prism_reproduces_profile_at_each_ring() {
        let profile = rect_profile(200.0, 400.0);
        let mesh = prism(&profile, 3000.0, 1);
        // 2 rings of 4 wall vertices precede the cap vertices.
        for (i, expected) in profile.outer().iter().enumerate() {
            for ring in 0..2 {
                let v = mesh.positions[ring * 4 + i];
                assert!((v.x - expected.x).abs() < 1e-9);
                assert!((v.y - expected.y).abs() < 1e-9);
            }
        }
        assert!((mesh.positions[0].z + 1500.0).abs() < 1e-9);
        assert!((mesh.positions[4].z - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn taper_interpolates_linearly() {
        let wide = rect_profile(400.0, 400.0);
        let narrow = rect_profile(200.0, 200.0);
        let mesh = BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(0.0, wide),
                SegmentBoundary::new(1000.0, narrow),
            ],
            1000.0,
            MeshParams { subdivisions: 2 },
        )
        .execute()
        .unwrap();
        // Middle ring (index 1 of 3) is the average of the two profiles.
        let mid = mesh.positions[4];
        assert!((mid.x.abs() - 150.0).abs() < 1e-9);
        assert!((mid.y.abs() - 150.0).abs() < 1e-9);
        assert!(mid.z.abs() < 1e-9);
    }

    #[test]
    fn too_few_boundaries_rejected() {
        let result = BuildTaperedMesh::new(
            vec![SegmentBoundary::new(0.0, rect_profile(100.0, 100.0))],
            1000.0,
            MeshParams::default(),
        )
        .execute();
        assert!(matches!(
            result,
            Err(crate::error::TaperMeshError::Contract(
                ContractViolation::TooFewBoundaries(1)
            ))
        ));
    }

    #[test]
    fn outer_vertex_count_mismatch_rejected() {
        let rect = rect_profile(100.0, 100.0);
        let hexish = ProfileKind::L {
            depth: 100.0,
            width: 100.0,
            thickness: 10.0,
        }
        .build()
        .unwrap();
        let result = BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(0.0, rect),
                SegmentBoundary::new(1000.0, hexish),
            ],
            1000.0,
            MeshParams::default(),
        )
        .execute();
        assert!(matches!(
            result,
            Err(crate::error::TaperMeshError::Contract(
                ContractViolation::OuterVertexCountMismatch { first: 4, second: 6 }
            ))
        ));
    }

    #[test]
    fn hole_count_mismatch_rejected() {
        let solid = rect_profile(300.0, 300.0);
        let hollow = box_profile();
        let result = BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(0.0, solid),
                SegmentBoundary::new(1000.0, hollow),
            ],
            1000.0,
            MeshParams::default(),
        )
        .execute();
        assert!(matches!(
            result,
            Err(crate::error::TaperMeshError::Contract(
                ContractViolation::HoleCountMismatch { first: 0, second: 1 }
            ))
        ));
    }

    #[test]
    fn non_ascending_boundaries_rejected() {
        let p = rect_profile(100.0, 100.0);
        let result = BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(500.0, p.clone()),
                SegmentBoundary::new(500.0, p),
            ],
            1000.0,
            MeshParams::default(),
        )
        .execute();
        assert!(result.is_err());
    }

    #[test]
    fn solid_prism_walls_are_manifold() {
        let mesh = prism(&rect_profile(200.0, 300.0), 2000.0, 1);
        // 4 wall quads = 8 wall triangles before the caps.
        let counts = wall_edge_sharing(&mesh, 8);
        for (&(a, b), &count) in &counts {
            let on_end_ring = (a < 4 && b < 4) || (a >= 4 && b >= 4 && a < 8 && b < 8);
            if on_end_ring {
                // Rim edges border the cap, which has its own vertices.
                assert_eq!(count, 1, "rim edge {a}-{b}");
            } else {
                assert_eq!(count, 2, "interior wall edge {a}-{b}");
            }
        }
    }

    #[test]
    fn hollow_box_scenario_watertight_and_subdivision_stable() {
        let mesh = prism(&box_profile(), 4000.0, 1);
        // Outer 8 + inner 8 wall triangles, 8 triangles per cap.
        assert_eq!(mesh.indices.len(), 8 + 8 + 8 + 8);

        // Hole walls face the cavity: inner wall vertices (indices 8..16)
        // have normals pointing toward the member axis.
        for idx in 8..16 {
            let v = mesh.positions[idx];
            let n = mesh.normals[idx];
            let inward = -Vector3::new(v.x, v.y, 0.0).normalize();
            assert!(
                n.dot(&inward) > 0.5,
                "inner wall normal at {v:?} not inward: {n:?}"
            );
        }
        // Outer wall normals point away from the axis.
        for idx in 0..8 {
            let v = mesh.positions[idx];
            let n = mesh.normals[idx];
            let outward = Vector3::new(v.x, v.y, 0.0).normalize();
            assert!(n.dot(&outward) > 0.5, "outer wall normal at {v:?}: {n:?}");
        }

        // Triangle count is independent of subdivision for a uniform member.
        let subdivided = prism(&box_profile(), 4000.0, 4);
        assert_eq!(mesh.indices.len(), subdivided.indices.len());
    }

    #[test]
    fn tapered_member_honors_subdivision() {
        let wide = rect_profile(400.0, 400.0);
        let narrow = rect_profile(200.0, 200.0);
        let build = |subdivisions| {
            BuildTaperedMesh::new(
                vec![
                    SegmentBoundary::new(0.0, wide.clone()),
                    SegmentBoundary::new(1000.0, narrow.clone()),
                ],
                1000.0,
                MeshParams { subdivisions },
            )
            .execute()
            .unwrap()
        };
        let coarse = build(1);
        let fine = build(3);
        // 2 extra rings of 4 quads each, 2 triangles per quad.
        assert_eq!(fine.indices.len() - coarse.indices.len(), 16);
    }

    #[test]
    fn caps_sit_on_the_boundary_rims() {
        // Boundaries cover only [100, 900] of a 1000 mm member; the caps
        // must sit on the first and last rings, not at the member ends.
        let profile = rect_profile(200.0, 300.0);
        let mesh = BuildTaperedMesh::new(
            vec![
                SegmentBoundary::new(100.0, profile.clone()),
                SegmentBoundary::new(900.0, profile),
            ],
            1000.0,
            MeshParams::default(),
        )
        .execute()
        .unwrap();
        // 2 rings of 4 wall vertices, then the cap vertices.
        assert!((mesh.positions[0].z + 400.0).abs() < 1e-9);
        assert!((mesh.positions[4].z - 400.0).abs() < 1e-9);
        for v in &mesh.positions[8..] {
            assert!(
                (v.z.abs() - 400.0).abs() < 1e-9,
                "cap vertex off the rim plane: {v:?}"
            );
        }
    }

    #[test]
    fn wall_u_follows_perimeter_fraction() {
        // 200 x 400 rectangle: edge lengths 200, 400, 200, 400, so the
        // cumulative perimeter fractions are 0, 1/6, 1/2, 2/3.
        let mesh = prism(&rect_profile(200.0, 400.0), 1000.0, 1);
        let expected = [0.0, 1.0 / 6.0, 0.5, 2.0 / 3.0];
        for (i, &u) in expected.iter().enumerate() {
            assert!(
                (mesh.uvs[i].x - u).abs() < 1e-9,
                "u at vertex {i}: {} vs {u}",
                mesh.uvs[i].x
            );
        }
    }

    #[test]
    fn lateral_normals_are_unit_length() {
        let mesh = prism(&rect_profile(150.0, 250.0), 1200.0, 1);
        for n in mesh.normals.iter().take(8) {
            assert!((n.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn smooth_normals_have_no_axial_component_on_straight_walls() {
        let mesh = prism(&rect_profile(150.0, 250.0), 1200.0, 1);
        for n in mesh.normals.iter().take(8) {
            assert!(n.z.abs() < 1e-9, "straight prism wall normal tilted: {n:?}");
        }
    }
}
