//! Edge topology derived from a triangle mesh.
//!
//! [`Topology`] enumerates the unique undirected edges of a mesh together
//! with the one or two faces adjacent to each edge. It is the input to seam
//! detection and island extraction, and carries the counts needed for the
//! Euler-characteristic diagnostic.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::Mesh;

/// Unique edge set of a mesh with per-edge face adjacency.
///
/// Edges are stored as `(u, v)` pairs with `u < v`, enumerated in
/// lexicographic order so that edge indices are deterministic for a given
/// mesh. An interior edge has two adjacent faces; a boundary edge has one.
#[derive(Debug, Clone)]
pub struct Topology {
    edges: Vec<(usize, usize)>,
    edge_faces: Vec<(usize, Option<usize>)>,
    num_vertices: usize,
    num_faces: usize,
}

impl Topology {
    /// Derive the edge topology of `mesh`.
    ///
    /// Each triangle contributes its three undirected edges. The first face
    /// to touch an edge becomes `f0`, the second `f1`; a third or later
    /// incidence (non-manifold input) is silently dropped, treating the
    /// first two faces as the manifold neighborhood.
    pub fn build(mesh: &Mesh) -> Self {
        // BTreeMap keys are (min, max), so iteration yields the edges in
        // lexicographic order for free.
        let mut edge_map: BTreeMap<(usize, usize), (usize, Option<usize>)> = BTreeMap::new();

        for (f, tri) in mesh.triangles().iter().enumerate() {
            for i in 0..3 {
                let a = tri[i];
                let b = tri[(i + 1) % 3];
                let key = if a < b { (a, b) } else { (b, a) };

                match edge_map.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert((f, None));
                    }
                    Entry::Occupied(mut slot) => {
                        let (_, second) = slot.get_mut();
                        if second.is_none() {
                            *second = Some(f);
                        }
                        // third and later faces on this edge are dropped
                    }
                }
            }
        }

        let mut edges = Vec::with_capacity(edge_map.len());
        let mut edge_faces = Vec::with_capacity(edge_map.len());
        for (key, faces) in edge_map {
            edges.push(key);
            edge_faces.push(faces);
        }

        Self {
            edges,
            edge_faces,
            num_vertices: mesh.num_vertices(),
            num_faces: mesh.num_triangles(),
        }
    }

    /// Number of unique edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertices of the source mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of faces of the source mesh.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// The endpoints `(u, v)` of edge `e`, with `u < v`.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// The faces adjacent to edge `e`. The second face is `None` for a
    /// boundary edge.
    #[inline]
    pub fn edge_faces(&self, e: usize) -> (usize, Option<usize>) {
        self.edge_faces[e]
    }

    /// Whether edge `e` has two adjacent faces.
    #[inline]
    pub fn is_interior(&self, e: usize) -> bool {
        self.edge_faces[e].1.is_some()
    }

    /// Indices of all interior edges, ascending.
    pub fn interior_edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.edges.len()).filter(|&e| self.is_interior(e))
    }

    /// Number of boundary edges (edges with a single adjacent face).
    pub fn num_boundary_edges(&self) -> usize {
        self.edge_faces.iter().filter(|(_, f1)| f1.is_none()).count()
    }

    /// Euler characteristic `V - E + F`.
    ///
    /// A closed orientable genus-0 surface gives 2. Other values indicate
    /// boundaries, handles, or disconnected components — diagnostics, never
    /// errors.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices as i64 - self.edges.len() as i64 + self.num_faces as i64
    }
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

    fn create_split_quad() -> Mesh {
        // Unit square in z=0, split along the diagonal 0-2.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2], [0, 2, 3]];
        Mesh::new(positions, triangles).unwrap()
    }

    #[test]
    fn test_tetrahedron_topology() {
        let mesh = create_tetrahedron();
        let topo = Topology::build(&mesh);

        assert_eq!(topo.num_vertices(), 4);
        assert_eq!(topo.num_edges(), 6);
        assert_eq!(topo.num_faces(), 4);
        assert_eq!(topo.euler_characteristic(), 2);
        assert_eq!(topo.num_boundary_edges(), 0);
        assert_eq!(topo.interior_edges().count(), 6);
    }

    #[test]
    fn test_split_quad_topology() {
        let mesh = create_split_quad();
        let topo = Topology::build(&mesh);

        assert_eq!(topo.num_edges(), 5);
        assert_eq!(topo.num_boundary_edges(), 4);
        assert_eq!(topo.interior_edges().count(), 1);
        assert_eq!(topo.euler_characteristic(), 1);

        // The single interior edge is the diagonal.
        let e = topo.interior_edges().next().unwrap();
        assert_eq!(topo.edge(e), (0, 2));
        let (f0, f1) = topo.edge_faces(e);
        assert_eq!(f0, 0);
        assert_eq!(f1, Some(1));
    }

    #[test]
    fn test_edges_sorted_lexicographically() {
        let mesh = create_tetrahedron();
        let topo = Topology::build(&mesh);

        let edges: Vec<_> = (0..topo.num_edges()).map(|e| topo.edge(e)).collect();
        let mut sorted = edges.clone();
        sorted.sort();
        assert_eq!(edges, sorted);
        for &(u, v) in &edges {
            assert!(u < v);
        }
    }

    #[test]
    fn test_halfedge_count_invariant() {
        // sum over edges of (1 if boundary else 2) == 3 * F
        for mesh in [create_tetrahedron(), create_split_quad()] {
            let topo = Topology::build(&mesh);
            let halfedges: usize = (0..topo.num_edges())
                .map(|e| if topo.is_interior(e) { 2 } else { 1 })
                .sum();
            assert_eq!(halfedges, 3 * topo.num_faces());
        }
    }

    #[test]
    fn test_non_manifold_edge_keeps_first_two_faces() {
        // Three triangles sharing the edge (0, 1).
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let triangles = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let mesh = Mesh::new(positions, triangles).unwrap();
        let topo = Topology::build(&mesh);

        let e = (0..topo.num_edges())
            .find(|&e| topo.edge(e) == (0, 1))
            .unwrap();
        assert_eq!(topo.edge_faces(e), (0, Some(1)));
    }
}
