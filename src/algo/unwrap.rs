//! The unwrapping pipeline.
//!
//! [`unwrap`] ties the stages together: edge topology, seam detection,
//! island extraction, per-island LSCM parameterization, optional packing,
//! and quality metrics. Data flows one way through the stages; the input
//! mesh is never mutated and the returned mesh owns its own UV array.

use nalgebra::Point2;
use rayon::prelude::*;

use crate::error::{Result, UnwrapError};
use crate::mesh::{Mesh, Topology};

use super::islands::extract_islands;
use super::lscm::parameterize_island;
use super::metrics::{compute_coverage, compute_stretch};
use super::pack::pack_islands;
use super::seams::{detect_seams, SeamOptions};

/// Raster resolution used for the coverage metric.
const COVERAGE_RESOLUTION: usize = 512;

/// Options for [`unwrap`].
#[derive(Debug, Clone)]
pub struct UnwrapOptions {
    /// Seam-detection angle threshold in degrees (reserved; the baseline
    /// detector ignores it).
    pub angle_threshold: f64,

    /// Islands with fewer faces are skipped: their vertices keep zero UVs
    /// but their faces keep their island id in the report.
    pub min_island_faces: usize,

    /// Pack the islands into [0,1]² after parameterization.
    pub pack_islands: bool,

    /// Spacing between packed islands, in UV units.
    pub island_margin: f32,

    /// Solve islands on the rayon thread pool. Islands are independent and
    /// results are emitted in island order either way.
    pub parallel: bool,
}

impl Default for UnwrapOptions {
    fn default() -> Self {
        Self {
            angle_threshold: 30.0,
            min_island_faces: 1,
            pack_islands: true,
            island_margin: 0.02,
            parallel: true,
        }
    }
}

/// Result metadata produced alongside the unwrapped mesh.
#[derive(Debug, Clone)]
pub struct UnwrapReport {
    /// Total number of islands.
    pub num_islands: usize,
    /// Island id per face, each in `[0, num_islands)`.
    pub face_island_ids: Vec<usize>,
    /// Mean per-triangle stretch.
    pub avg_stretch: f32,
    /// Worst per-triangle stretch.
    pub max_stretch: f32,
    /// Fraction of [0,1]² covered by UV triangles.
    pub coverage: f32,
}

/// Unwrap `mesh` into a copy with per-vertex UV coordinates.
///
/// Islands whose LSCM solve fails (too few vertices, singular system,
/// non-finite solution) fall back to a planar projection onto the XY plane
/// so the pipeline always completes; such failures never abort the call.
///
/// # Errors
///
/// Returns [`UnwrapError::EmptyMesh`] for a mesh with no vertices or faces.
///
/// # Example
///
/// ```
/// use seamster::prelude::*;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
/// let mesh = Mesh::new(positions, triangles).unwrap();
///
/// let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();
/// assert_eq!(report.num_islands, 1);
/// assert!(unwrapped.uvs().is_some());
/// ```
pub fn unwrap(mesh: &Mesh, options: &UnwrapOptions) -> Result<(Mesh, UnwrapReport)> {
    if mesh.num_vertices() == 0 || mesh.num_triangles() == 0 {
        return Err(UnwrapError::EmptyMesh);
    }

    let topology = Topology::build(mesh);
    let seam_options = SeamOptions {
        angle_threshold: options.angle_threshold,
    };
    let seams = detect_seams(&topology, &seam_options);
    let islands = extract_islands(&topology, &seams);

    let mut result = mesh.clone();
    result.set_uvs(vec![Point2::origin(); mesh.num_vertices()]);

    // Solve each island to a list of (vertex, uv) writes. The scatter below
    // runs in island order, so parallel solving cannot change the output.
    let groups = islands.island_faces();
    let solve_one = |faces: &Vec<usize>| -> Vec<(usize, Point2<f32>)> {
        if faces.len() < options.min_island_faces {
            return Vec::new();
        }
        match parameterize_island(mesh, faces) {
            Ok(chart) => chart
                .iter()
                .map(|(gv, uv)| (gv, Point2::new(uv.x as f32, uv.y as f32)))
                .collect(),
            Err(_) => planar_projection(mesh, faces),
        }
    };
    let writes: Vec<Vec<(usize, Point2<f32>)>> = if options.parallel {
        groups.par_iter().map(|faces| solve_one(faces)).collect()
    } else {
        groups.iter().map(solve_one).collect()
    };

    if let Some(uvs) = result.uvs_mut() {
        for island_writes in &writes {
            for &(gv, uv) in island_writes {
                uvs[gv] = uv;
            }
        }
    }

    if options.pack_islands {
        pack_islands(&mut result, &islands, options.island_margin);
    }

    let stretch = compute_stretch(&result);
    let coverage = compute_coverage(&result, COVERAGE_RESOLUTION);

    let report = UnwrapReport {
        num_islands: islands.num_islands(),
        face_island_ids: islands.face_island_ids().to_vec(),
        avg_stretch: stretch.avg,
        max_stretch: stretch.max,
        coverage,
    };

    Ok((result, report))
}

/// Fallback chart: project the island's vertices onto the XY plane.
fn planar_projection(mesh: &Mesh, faces: &[usize]) -> Vec<(usize, Point2<f32>)> {
    let mut seen = vec![false; mesh.num_vertices()];
    let mut writes = Vec::new();
    for &f in faces {
        for &gv in &mesh.triangles()[f] {
            if !seen[gv] {
                seen[gv] = true;
                let p = mesh.position(gv);
                writes.push((gv, Point2::new(p.x as f32, p.y as f32)));
            }
        }
    }
    writes
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn create_tetrahedron() -> Mesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        Mesh::new(positions, triangles).unwrap()
    }

    fn create_two_tetrahedra() -> Mesh {
        let tetra = create_tetrahedron();
        let mut positions = tetra.positions().to_vec();
        let offset = nalgebra::Vector3::new(10.0, 0.0, 0.0);
        positions.extend(tetra.positions().iter().map(|p| p + offset));
        let mut triangles = tetra.triangles().to_vec();
        triangles.extend(
            tetra
                .triangles()
                .iter()
                .map(|t| [t[0] + 4, t[1] + 4, t[2] + 4]),
        );
        Mesh::new(positions, triangles).unwrap()
    }

    fn assert_uvs_in_unit_square(mesh: &Mesh) {
        for uv in mesh.uvs().unwrap() {
            assert!(uv.x.is_finite() && uv.y.is_finite());
            assert!(uv.x >= -1e-5 && uv.x <= 1.0 + 1e-5, "u = {}", uv.x);
            assert!(uv.y >= -1e-5 && uv.y <= 1.0 + 1e-5, "v = {}", uv.y);
        }
    }

    #[test]
    fn test_unwrap_tetrahedron() {
        let mesh = create_tetrahedron();
        let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();

        assert_eq!(report.num_islands, 1);
        assert_eq!(report.face_island_ids, vec![0, 0, 0, 0]);
        assert_eq!(unwrapped.uvs().unwrap().len(), 4);
        assert_uvs_in_unit_square(&unwrapped);

        // Input mesh is untouched.
        assert!(mesh.uvs().is_none());
    }

    #[test]
    fn test_unwrap_two_components() {
        let mesh = create_two_tetrahedra();
        let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();

        assert_eq!(report.num_islands, 2);
        assert_eq!(&report.face_island_ids[..4], &[0, 0, 0, 0]);
        assert_eq!(&report.face_island_ids[4..], &[1, 1, 1, 1]);
        assert_uvs_in_unit_square(&unwrapped);

        // The two packed islands occupy disjoint v ranges (both are unit
        // boxes, so the shelf packer stacks them).
        let uvs = unwrapped.uvs().unwrap();
        let max_v0 = uvs[..4].iter().map(|uv| uv.y).fold(f32::MIN, f32::max);
        let min_v1 = uvs[4..].iter().map(|uv| uv.y).fold(f32::MAX, f32::min);
        let max_v1 = uvs[4..].iter().map(|uv| uv.y).fold(f32::MIN, f32::max);
        let min_v0 = uvs[..4].iter().map(|uv| uv.y).fold(f32::MAX, f32::min);
        assert!(max_v0 <= min_v1 + 1e-6 || max_v1 <= min_v0 + 1e-6);
    }

    #[test]
    fn test_unwrap_with_degenerate_face() {
        // A zero-area triangle through a duplicated position. Its edge
        // (0, 1) is already saturated, so it becomes its own island and
        // resolves through the planar fallback.
        let tetra = create_tetrahedron();
        let mut positions = tetra.positions().to_vec();
        positions.push(positions[0]);
        let dup = positions.len() - 1;
        let mut triangles = tetra.triangles().to_vec();
        triangles.push([0, dup, 1]);
        let mesh = Mesh::new(positions, triangles).unwrap();

        let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();
        assert_eq!(report.num_islands, 2);
        for uv in unwrapped.uvs().unwrap() {
            assert!(uv.x.is_finite() && uv.y.is_finite());
        }
    }

    #[test]
    fn test_min_island_faces_skips_small_islands() {
        let mesh = create_tetrahedron();
        let options = UnwrapOptions {
            min_island_faces: 10,
            ..Default::default()
        };
        let (unwrapped, report) = unwrap(&mesh, &options).unwrap();

        // The island is skipped but keeps its id; vertices stay unmapped.
        assert_eq!(report.num_islands, 1);
        for uv in unwrapped.uvs().unwrap() {
            assert_eq!(*uv, Point2::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_unwrap_is_deterministic() {
        let mesh = create_two_tetrahedra();
        let options = UnwrapOptions::default();

        let (a, report_a) = unwrap(&mesh, &options).unwrap();
        let (b, report_b) = unwrap(&mesh, &options).unwrap();

        assert_eq!(report_a.face_island_ids, report_b.face_island_ids);
        assert_eq!(a.uvs().unwrap(), b.uvs().unwrap());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let mesh = create_two_tetrahedra();
        let parallel = unwrap(&mesh, &UnwrapOptions::default()).unwrap();
        let sequential = unwrap(
            &mesh,
            &UnwrapOptions {
                parallel: false,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(parallel.0.uvs().unwrap(), sequential.0.uvs().unwrap());
    }
}
