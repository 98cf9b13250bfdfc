//! Island extraction: connected components after seam cuts.
//!
//! Removing the seam edges from the face graph splits the mesh into
//! connected components, the UV islands (charts). Each island is
//! parameterized independently and later packed into the unit square.

use crate::mesh::Topology;

/// Assignment of every face to a UV island.
#[derive(Debug, Clone)]
pub struct IslandAssignment {
    face_island: Vec<usize>,
    num_islands: usize,
}

impl IslandAssignment {
    /// Island id of face `f`.
    #[inline]
    pub fn island_of(&self, f: usize) -> usize {
        self.face_island[f]
    }

    /// Per-face island ids, indexed by face.
    #[inline]
    pub fn face_island_ids(&self) -> &[usize] {
        &self.face_island
    }

    /// Total number of islands.
    #[inline]
    pub fn num_islands(&self) -> usize {
        self.num_islands
    }

    /// Faces grouped by island, each group in ascending face order.
    pub fn island_faces(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.num_islands];
        for (f, &island) in self.face_island.iter().enumerate() {
            groups[island].push(f);
        }
        groups
    }
}

/// Partition the faces into islands, treating `seams` as cuts.
///
/// Builds face adjacency over the non-seam interior edges and runs BFS from
/// the lowest-index unvisited face, so islands are numbered in the order
/// their seed face appears. Two faces share an island id iff they are
/// connected by a seam-free path in the face graph.
///
/// `seams` must contain valid edge indices; non-interior entries are
/// ignored (boundary edges never connect faces in the first place).
pub fn extract_islands(topology: &Topology, seams: &[usize]) -> IslandAssignment {
    let num_faces = topology.num_faces();

    let mut is_seam = vec![false; topology.num_edges()];
    for &e in seams {
        is_seam[e] = true;
    }

    let mut face_adjacency: Vec<Vec<usize>> = vec![Vec::new(); num_faces];
    for e in topology.interior_edges() {
        if is_seam[e] {
            continue;
        }
        let (f0, f1) = topology.edge_faces(e);
        let f1 = f1.expect("interior edge has two faces");
        face_adjacency[f0].push(f1);
        face_adjacency[f1].push(f0);
    }

    let mut face_island = vec![usize::MAX; num_faces];
    let mut num_islands = 0;
    let mut queue = Vec::new();

    for start in 0..num_faces {
        if face_island[start] != usize::MAX {
            continue;
        }

        queue.clear();
        queue.push(start);
        face_island[start] = num_islands;

        let mut front = 0;
        while front < queue.len() {
            let face = queue[front];
            front += 1;
            for &neighbor in &face_adjacency[face] {
                if face_island[neighbor] == usize::MAX {
                    face_island[neighbor] = num_islands;
                    queue.push(neighbor);
                }
            }
        }

        num_islands += 1;
    }

    IslandAssignment {
        face_island,
        num_islands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
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

    #[test]
    fn test_no_seams_single_island() {
        let topo = Topology::build(&create_tetrahedron());
        let islands = extract_islands(&topo, &[]);

        assert_eq!(islands.num_islands(), 1);
        assert!(islands.face_island_ids().iter().all(|&id| id == 0));
    }

    #[test]
    fn test_all_interior_edges_cut_isolates_faces() {
        let topo = Topology::build(&create_tetrahedron());
        let seams: Vec<usize> = topo.interior_edges().collect();
        let islands = extract_islands(&topo, &seams);

        assert_eq!(islands.num_islands(), 4);
        // Islands numbered by seed face, scanning low to high.
        assert_eq!(islands.face_island_ids(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_non_seam_edges_stay_within_island() {
        let topo = Topology::build(&create_tetrahedron());
        let seams: Vec<usize> = topo.interior_edges().take(3).collect();
        let islands = extract_islands(&topo, &seams);

        let is_seam: Vec<bool> = (0..topo.num_edges())
            .map(|e| seams.contains(&e))
            .collect();
        for e in topo.interior_edges() {
            if !is_seam[e] {
                let (f0, f1) = topo.edge_faces(e);
                assert_eq!(islands.island_of(f0), islands.island_of(f1.unwrap()));
            }
        }
    }

    #[test]
    fn test_disconnected_components_become_islands() {
        let tetra = create_tetrahedron();
        let mut positions = tetra.positions().to_vec();
        let offset = nalgebra::Vector3::new(5.0, 0.0, 0.0);
        positions.extend(tetra.positions().iter().map(|p| p + offset));
        let mut triangles = tetra.triangles().to_vec();
        triangles.extend(
            tetra
                .triangles()
                .iter()
                .map(|t| [t[0] + 4, t[1] + 4, t[2] + 4]),
        );
        let mesh = Mesh::new(positions, triangles).unwrap();
        let topo = Topology::build(&mesh);

        let islands = extract_islands(&topo, &[]);
        assert_eq!(islands.num_islands(), 2);
        assert_eq!(islands.island_faces()[0], vec![0, 1, 2, 3]);
        assert_eq!(islands.island_faces()[1], vec![4, 5, 6, 7]);
    }
}
