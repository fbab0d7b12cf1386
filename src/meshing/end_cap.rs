use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TriangulationError};
use crate::math::{Point2, Point3, Vector3};
use crate::profile::CrossSectionProfile;

use super::MeshBuffers;

/// Triangulates one cross-section profile into a flat end cap at a fixed
/// axial coordinate.
///
/// Handles concave outer contours (I/H shapes) and multiple
/// non-overlapping holes (box/pipe cavities) via constrained Delaunay
/// triangulation: the contour and hole loops become constraint edges and
/// a flood fill classifies triangles by constraint-crossing parity. A
/// naive fan from the first vertex is explicitly insufficient here.
pub struct TriangulateEndCap<'a> {
    profile: &'a CrossSectionProfile,
    depth: f64,
    reverse: bool,
}

impl<'a> TriangulateEndCap<'a> {
    /// Creates a new `TriangulateEndCap` operation.
    ///
    /// * `depth` - Axial (z) coordinate of the cap plane.
    /// * `reverse` - Flip output winding; one routine serves both end
    ///   caps. Unreversed triangles face +z.
    #[must_use]
    pub fn new(profile: &'a CrossSectionProfile, depth: f64, reverse: bool) -> Self {
        Self {
            profile,
            depth,
            reverse,
        }
    }

    /// Executes the triangulation, returning triangles exactly covering
    /// the contour area minus holes.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint loop is degenerate or a CDT
    /// insertion fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<MeshBuffers> {
        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
        insert_constraint_loop(&mut cdt, self.profile.outer())?;
        for hole in self.profile.holes() {
            insert_constraint_loop(&mut cdt, hole)?;
        }

        let interior_faces = classify_interior_faces(&cdt);

        let normal = if self.reverse {
            -Vector3::z()
        } else {
            Vector3::z()
        };

        let mut mesh = MeshBuffers::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            let fix = face_handle.fix();
            if !interior_faces.contains(&fix.index()) {
                continue;
            }

            let verts = face_handle.vertices();
            let mut tri_indices = [0u32; 3];

            for (i, vh) in verts.iter().enumerate() {
                let idx = vh.fix().index();
                let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                    existing
                } else {
                    let pos = vh.position();
                    let new_idx = mesh.positions.len() as u32;
                    mesh.positions.push(Point3::new(pos.x, pos.y, self.depth));
                    mesh.normals.push(normal);
                    mesh.uvs.push(Point2::new(pos.x, pos.y));
                    vertex_map.insert(idx, new_idx);
                    new_idx
                };
                tri_indices[i] = mesh_idx;
            }

            // CDT faces come out counter-clockwise, which faces +z.
            if self.reverse {
                tri_indices.swap(1, 2);
            }
            mesh.indices.push(tri_indices);
        }

        Ok(mesh)
    }
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[Point2],
) -> Result<()> {
    if points.len() < 3 {
        return Err(TriangulationError::DegenerateLoop(points.len()).into());
    }

    let mut handles = Vec::with_capacity(points.len());
    for pt in points {
        let h = cdt
            .insert(SpadePoint2::new(pt.x, pt.y))
            .map_err(|e: InsertionError| TriangulationError::Insertion(format!("{e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Classifies which inner faces of the CDT lie inside the section using
/// flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0.
/// Each time a constraint edge is crossed, depth increments. Odd depth =
/// inside the section (depth 1 inside the outer contour, depth 2 inside
/// a hole).
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    // Seed: inner faces adjacent to the outer face via directed edges
    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    // BFS flood-fill
    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon::signed_area;
    use crate::profile::ProfileKind;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn covered_area(mesh: &MeshBuffers) -> f64 {
        mesh.indices
            .iter()
            .map(|t| {
                let a = mesh.positions[t[0] as usize];
                let b = mesh.positions[t[1] as usize];
                let c = mesh.positions[t[2] as usize];
                ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
            })
            .sum()
    }

    #[test]
    fn triangle_produces_one_triangle() {
        let profile =
            CrossSectionProfile::solid(vec![p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)]).unwrap();
        let mesh = TriangulateEndCap::new(&profile, 0.0, false).execute().unwrap();
        assert_eq!(mesh.indices.len(), 1);
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.uvs.len(), 3);
    }

    #[test]
    fn concave_h_shape_covers_exact_area() {
        let profile = ProfileKind::H {
            depth: 300.0,
            width: 200.0,
            web_thickness: 10.0,
            flange_thickness: 16.0,
        }
        .build()
        .unwrap();
        let mesh = TriangulateEndCap::new(&profile, 0.0, false).execute().unwrap();
        let expected = signed_area(profile.outer());
        assert!(
            (covered_area(&mesh) - expected).abs() < 1e-6,
            "covered {} expected {}",
            covered_area(&mesh),
            expected
        );
    }

    #[test]
    fn hole_is_excluded() {
        let profile = ProfileKind::Box {
            depth: 300.0,
            width: 300.0,
            wall_thickness: 20.0,
        }
        .build()
        .unwrap();
        let mesh = TriangulateEndCap::new(&profile, 0.0, false).execute().unwrap();
        // Signed area of the covered region: outer minus cavity.
        let expected = 300.0 * 300.0 - 260.0 * 260.0;
        assert!((covered_area(&mesh) - expected).abs() < 1e-6);
        // No triangle centroid inside the cavity.
        for tri in &mesh.indices {
            let cx = (mesh.positions[tri[0] as usize].x
                + mesh.positions[tri[1] as usize].x
                + mesh.positions[tri[2] as usize].x)
                / 3.0;
            let cy = (mesh.positions[tri[0] as usize].y
                + mesh.positions[tri[1] as usize].y
                + mesh.positions[tri[2] as usize].y)
                / 3.0;
            assert!(
                !(cx.abs() < 130.0 && cy.abs() < 130.0),
                "triangle centroid ({cx}, {cy}) is inside the cavity"
            );
        }
    }

    #[test]
    fn reverse_flips_winding_and_normals() {
        let profile =
            CrossSectionProfile::solid(vec![p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)]).unwrap();
        let fwd = TriangulateEndCap::new(&profile, 5.0, false).execute().unwrap();
        let rev = TriangulateEndCap::new(&profile, -5.0, true).execute().unwrap();
        assert!(covered_area(&fwd) > 0.0);
        assert!(covered_area(&rev) < 0.0);
        for n in &fwd.normals {
            assert!((n.z - 1.0).abs() < 1e-12);
        }
        for n in &rev.normals {
            assert!((n.z + 1.0).abs() < 1e-12);
        }
        assert!(fwd.positions.iter().all(|v| (v.z - 5.0).abs() < 1e-12));
        assert!(rev.positions.iter().all(|v| (v.z + 5.0).abs() < 1e-12));
    }

    #[test]
    fn pipe_with_hole_triangulates() {
        let profile = ProfileKind::Pipe {
            outer_diameter: 200.0,
            wall_thickness: 20.0,
            segments: 24,
        }
        .build()
        .unwrap();
        let mesh = TriangulateEndCap::new(&profile, 0.0, false).execute().unwrap();
        // Annulus with n boundary vertices per loop: V + 2h - 2 triangles.
        assert_eq!(mesh.indices.len(), 48);
    }

    #[test]
    fn collinear_contour_yields_empty_cap() {
        // Collinear vertices pass the vertex-count guard; the CDT still
        // inserts them but no interior faces survive classification.
        let profile =
            CrossSectionProfile::solid(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]).unwrap();
        let mesh = TriangulateEndCap::new(&profile, 0.0, false).execute().unwrap();
        assert!(covered_area(&mesh).abs() < 1e-12);
    }
}
