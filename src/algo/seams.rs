//! Seam detection over the dual graph.
//!
//! A seam is an interior edge along which the UV mapping is allowed to be
//! discontinuous. This module finds seams by building a spanning tree of the
//! dual (face) graph: the tree edges keep faces connected for unfolding,
//! and every remaining interior edge becomes a seam. Any spanning tree of
//! the dual graph yields a topological-disk cut sufficient to flatten an
//! orientable closed surface; BFS gives deterministic, short-diameter cuts.

use std::collections::VecDeque;

use crate::mesh::Topology;

/// Options for seam detection.
#[derive(Debug, Clone)]
pub struct SeamOptions {
    /// Angular-defect threshold in degrees, reserved for a refinement pass
    /// that would add seams near sharp vertices. The spanning-tree detector
    /// accepts and ignores it.
    pub angle_threshold: f64,
}

impl Default for SeamOptions {
    fn default() -> Self {
        Self {
            angle_threshold: 30.0,
        }
    }
}

/// Detect seam edges for `topology`.
///
/// Runs a BFS spanning forest over the dual graph, restarting from the
/// lowest-index unvisited face so that every connected component gets its
/// own tree. Returns the interior edges left out of the forest, in
/// ascending edge order. Boundary edges are never seams.
///
/// For a connected closed mesh this yields `E - (F - 1)` seams: the dual
/// spanning tree uses `F - 1` of the `E` interior edges.
pub fn detect_seams(topology: &Topology, _options: &SeamOptions) -> Vec<usize> {
    let num_faces = topology.num_faces();
    if num_faces == 0 {
        return Vec::new();
    }

    // Dual adjacency: for each face, the (neighbor face, shared edge) pairs.
    let mut face_adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); num_faces];
    for e in topology.interior_edges() {
        let (f0, f1) = topology.edge_faces(e);
        let f1 = f1.expect("interior edge has two faces");
        face_adjacency[f0].push((f1, e));
        face_adjacency[f1].push((f0, e));
    }

    let mut visited = vec![false; num_faces];
    let mut in_tree = vec![false; topology.num_edges()];
    let mut queue = VecDeque::new();

    for start in 0..num_faces {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        while let Some(face) = queue.pop_front() {
            for &(neighbor, edge) in &face_adjacency[face] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    in_tree[edge] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    topology.interior_edges().filter(|&e| !in_tree[e]).collect()
}
