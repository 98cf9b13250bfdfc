//! Core mesh data structures.
//!
//! This module provides the indexed face-vertex mesh representation used by
//! the unwrapping pipeline, plus the derived edge [`Topology`].
//!
//! # Overview
//!
//! [`Mesh`] is a plain container: vertex positions, triangles as index
//! triples, and an optional per-vertex UV array. All adjacency information
//! lives in [`Topology`], which is derived on demand and owns its own
//! buffers — consumers receive mesh and topology as separate arguments.
//!
//! # Construction
//!
//! ```
//! use seamster::mesh::Mesh;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2]];
//!
//! let mesh = Mesh::new(positions, triangles).unwrap();
//! assert_eq!(mesh.num_vertices(), 3);
//! assert_eq!(mesh.num_triangles(), 1);
//! ```

mod topology;

pub use topology::Topology;

use nalgebra::{Point2, Point3};

use crate::error::{Result, UnwrapError};

/// A triangle mesh in face-vertex form.
///
/// Positions are double precision; UV coordinates, when present, are stored
/// single precision (solver arithmetic happens in `f64` and is truncated at
/// this boundary). Triangle orientation is preserved as given.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Point3<f64>>,
    triangles: Vec<[usize; 3]>,
    uvs: Option<Vec<Point2<f32>>>,
}

impl Mesh {
    /// Build a mesh from vertex positions and triangle index triples.
    ///
    /// Every index must lie in `[0, positions.len())`. Geometrically
    /// degenerate triangles (coincident or collinear vertices) are accepted;
    /// the solver skips them during assembly.
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::EmptyMesh`] when `triangles` is empty and
    /// [`UnwrapError::InvalidVertexIndex`] on an out-of-range index.
    pub fn new(positions: Vec<Point3<f64>>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(UnwrapError::EmptyMesh);
        }

        for (fi, tri) in triangles.iter().enumerate() {
            for &vi in tri {
                if vi >= positions.len() {
                    return Err(UnwrapError::InvalidVertexIndex { face: fi, vertex: vi });
                }
            }
        }

        Ok(Self {
            positions,
            triangles,
            uvs: None,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Position of vertex `v`.
    #[inline]
    pub fn position(&self, v: usize) -> Point3<f64> {
        self.positions[v]
    }

    /// All vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// All triangles as vertex index triples.
    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// The three corner positions of triangle `f`.
    #[inline]
    pub fn triangle_positions(&self, f: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.triangles[f];
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Per-vertex UV coordinates, if assigned.
    #[inline]
    pub fn uvs(&self) -> Option<&[Point2<f32>]> {
        self.uvs.as_deref()
    }

    /// Mutable access to the UV array, if assigned.
    #[inline]
    pub fn uvs_mut(&mut self) -> Option<&mut [Point2<f32>]> {
        self.uvs.as_deref_mut()
    }

    /// Assign a per-vertex UV array. Its length must equal the vertex count.
    pub fn set_uvs(&mut self, uvs: Vec<Point2<f32>>) {
        debug_assert_eq!(uvs.len(), self.positions.len());
        self.uvs = Some(uvs);
    }

    /// Axis-aligned bounding box of the vertex positions, or `None` for a
    /// mesh with no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;

        for p in &self.positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some((min, max))
    }

    /// Interior angle of triangle `f` at global vertex `v`, in radians.
    ///
    /// Returns 0.0 when `v` is not a corner of `f` or when an incident edge
    /// has zero length.
    pub fn vertex_angle(&self, f: usize, v: usize) -> f64 {
        let tri = self.triangles[f];
        let Some(corner) = tri.iter().position(|&c| c == v) else {
            return 0.0;
        };

        let p = self.positions[tri[corner]];
        let a = self.positions[tri[(corner + 1) % 3]];
        let b = self.positions[tri[(corner + 2) % 3]];

        let e1 = a - p;
        let e2 = b - p;
        let l1 = e1.norm();
        let l2 = e2.norm();
        if l1 < 1e-12 || l2 < 1e-12 {
            return 0.0;
        }

        (e1.dot(&e2) / (l1 * l2)).clamp(-1.0, 1.0).acos()
    }

    /// Angular defect at vertex `v`: 2π minus the sum of incident triangle
    /// angles. A discrete curvature measure — zero on flat interior
    /// vertices, positive at convex corners.
    pub fn angular_defect(&self, v: usize) -> f64 {
        let angle_sum: f64 = (0..self.triangles.len())
            .filter(|&f| self.triangles[f].contains(&v))
            .map(|f| self.vertex_angle(f, v))
            .sum();
        2.0 * std::f64::consts::PI - angle_sum
    }
}
