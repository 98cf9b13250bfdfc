//! # Seamster
//!
//! UV unwrapping for triangle meshes.
//!
//! Seamster computes a UV parameterization: every vertex of a 3D triangle
//! mesh is assigned a 2D coordinate in the unit square, so the surface
//! unfolds into flat "islands" suitable for texture mapping. The pipeline
//! cuts the mesh along automatically chosen seams, flattens each island
//! with Least Squares Conformal Maps, and packs the islands into [0,1]².
//!
//! ## Pipeline
//!
//! 1. **Topology**: derive the unique edge set with face adjacency
//! 2. **Seams**: BFS spanning tree over the dual graph; non-tree interior
//!    edges become cuts
//! 3. **Islands**: connected components of the face graph after the cuts
//! 4. **LSCM**: per-island conformal parameterization via a sparse LU solve
//! 5. **Packing**: shelf-pack island bounding boxes into the unit square
//!
//! ## Quick Start
//!
//! ```no_run
//! use seamster::prelude::*;
//!
//! // Load a mesh
//! let mesh = seamster::io::load("model.obj").unwrap();
//!
//! // Unwrap it
//! let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();
//! println!("Islands: {}", report.num_islands);
//! println!("Coverage: {:.1}%", report.coverage * 100.0);
//!
//! // Save the mesh with UVs
//! seamster::io::save(&unwrapped, "unwrapped.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use seamster::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let triangles = vec![
//!     [0, 2, 1], // bottom
//!     [0, 1, 3], // front
//!     [1, 2, 3], // right
//!     [2, 0, 3], // left
//! ];
//!
//! let mesh = Mesh::new(positions, triangles).unwrap();
//! let topology = Topology::build(&mesh);
//! assert_eq!(topology.euler_characteristic(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use seamster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::unwrap::{unwrap, UnwrapOptions, UnwrapReport};
    pub use crate::error::{Result, UnwrapError};
    pub use crate::mesh::{Mesh, Topology};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron_end_to_end() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let mesh = Mesh::new(positions, triangles).unwrap();

        let topology = Topology::build(&mesh);
        assert_eq!(topology.num_vertices(), 4);
        assert_eq!(topology.num_edges(), 6);
        assert_eq!(topology.num_faces(), 4);
        assert_eq!(topology.euler_characteristic(), 2);

        let (unwrapped, report) = unwrap(&mesh, &UnwrapOptions::default()).unwrap();
        assert_eq!(report.num_islands, 1);
        assert_eq!(report.face_island_ids.len(), 4);

        let uvs = unwrapped.uvs().expect("unwrap assigns UVs");
        assert_eq!(uvs.len(), 4);
        for uv in uvs {
            assert!(uv.x.is_finite() && uv.y.is_finite());
            assert!(uv.x >= -1e-5 && uv.x <= 1.0 + 1e-5);
            assert!(uv.y >= -1e-5 && uv.y <= 1.0 + 1e-5);
        }
    }
}
