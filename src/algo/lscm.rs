//! Least Squares Conformal Maps (LSCM) parameterization of one island.
//!
//! LSCM flattens a surface patch into the plane while minimizing the
//! deviation from a conformal (angle-preserving) map: per triangle, the
//! residual of the discrete Cauchy-Riemann equations weighted by area,
//! `area · ‖∇u − R_90°·∇v‖²`. Two vertices are pinned to remove the
//! translation/rotation/scale freedom; the resulting square sparse system
//! is solved with LU.
//!
//! # References
//!
//! - Lévy, B., Petitjean, S., Ray, N., & Maillot, J. (2002). "Least squares
//!   conformal maps for automatic texture atlas generation." ACM SIGGRAPH.

use std::collections::HashMap;

use nalgebra::{DVector, Point2, Point3};

use crate::error::{Result, UnwrapError};
use crate::mesh::Mesh;

use super::sparse::{CscMatrix, SparseLu};

/// Triangles with a smaller local-frame area are skipped during assembly.
const AREA_EPSILON: f64 = 1e-10;

/// Penalty weight added to the pinned vertices' diagonal entries.
const PIN_WEIGHT: f64 = 1e10;

/// UV ranges below this are treated as 1.0 during normalization.
const RANGE_EPSILON: f64 = 1e-6;

/// A solved UV chart for one island.
///
/// UVs are indexed by the island's local vertex order; `local_to_global`
/// maps each local index back to the mesh vertex it came from.
#[derive(Debug, Clone)]
pub struct IslandChart {
    local_to_global: Vec<usize>,
    uvs: Vec<Point2<f64>>,
}

impl IslandChart {
    /// Number of vertices in the chart.
    #[inline]
    pub fn len(&self) -> usize {
        self.uvs.len()
    }

    /// Whether the chart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uvs.is_empty()
    }

    /// Mesh vertex index for each local vertex, in first-touch order.
    #[inline]
    pub fn local_to_global(&self) -> &[usize] {
        &self.local_to_global
    }

    /// UV coordinates in local vertex order.
    #[inline]
    pub fn uvs(&self) -> &[Point2<f64>] {
        &self.uvs
    }

    /// Iterate over `(global vertex index, uv)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point2<f64>)> + '_ {
        self.local_to_global
            .iter()
            .zip(&self.uvs)
            .map(|(&gv, &uv)| (gv, uv))
    }
}

/// Compute the LSCM parameterization of the island formed by `faces`.
///
/// `faces` holds mesh triangle indices; the triangles are reindexed to a
/// local vertex set in first-touch order. Degenerate triangles contribute
/// nothing to the system. Two pin vertices are chosen (preferring the
/// island boundary) and fixed at (0,0) and (1,0) via a diagonal penalty;
/// the solved UVs are normalized so the chart's bounding box becomes
/// [0,1]×[0,1].
///
/// # Errors
///
/// - [`UnwrapError::IslandTooSmall`] when the island has fewer than three
///   distinct vertices.
/// - [`UnwrapError::SingularSystem`] when the LU factorization breaks down.
/// - [`UnwrapError::NonFiniteUv`] when the solution contains NaN or ∞.
pub fn parameterize_island(mesh: &Mesh, faces: &[usize]) -> Result<IslandChart> {
    // Local reindexing, first-touch order.
    let mut global_to_local: HashMap<usize, usize> = HashMap::new();
    let mut local_to_global: Vec<usize> = Vec::new();
    for &f in faces {
        for &gv in &mesh.triangles()[f] {
            global_to_local.entry(gv).or_insert_with(|| {
                local_to_global.push(gv);
                local_to_global.len() - 1
            });
        }
    }

    let n = local_to_global.len();
    if n < 3 {
        return Err(UnwrapError::IslandTooSmall { vertices: n });
    }

    // Assemble the conformal system.
    let mut triplets: Vec<(usize, usize, f64)> = Vec::with_capacity(faces.len() * 24 + 4);
    for &f in faces {
        let tri = mesh.triangles()[f];
        let local = [
            global_to_local[&tri[0]],
            global_to_local[&tri[1]],
            global_to_local[&tri[2]],
        ];
        let positions = [
            mesh.position(tri[0]),
            mesh.position(tri[1]),
            mesh.position(tri[2]),
        ];
        add_triangle_contribution(&mut triplets, local, positions);
    }

    // Pin the two vertices farthest apart, preferring boundary vertices.
    let (p1, p2) = select_pins(mesh, faces, &global_to_local, &local_to_global);

    triplets.push((2 * p1, 2 * p1, PIN_WEIGHT));
    triplets.push((2 * p1 + 1, 2 * p1 + 1, PIN_WEIGHT));
    triplets.push((2 * p2, 2 * p2, PIN_WEIGHT));
    triplets.push((2 * p2 + 1, 2 * p2 + 1, PIN_WEIGHT));

    let a = CscMatrix::from_triplets(2 * n, 2 * n, triplets);

    // Pin targets: p1 at (0,0), p2 at (1,0).
    let mut b = DVector::zeros(2 * n);
    b[2 * p2] = PIN_WEIGHT;

    let lu = SparseLu::factor(&a)?;
    let x = lu.solve(&b);

    let mut uvs: Vec<Point2<f64>> = (0..n)
        .map(|i| Point2::new(x[2 * i], x[2 * i + 1]))
        .collect();

    if uvs.iter().any(|uv| !uv.x.is_finite() || !uv.y.is_finite()) {
        return Err(UnwrapError::NonFiniteUv);
    }

    normalize_unit_square(&mut uvs);

    Ok(IslandChart {
        local_to_global,
        uvs,
    })
}

/// Add one triangle's conformal-energy block to the triplet list.
///
/// The triangle is expressed in an orthonormal frame of its own plane; for
/// each directed edge (i→j) with in-plane delta (dx, dy), the 2×2 block
/// `area · [[dx, dy], [dy, -dx]]` is added at (i, j) and subtracted on the
/// (i, i) diagonal.
fn add_triangle_contribution(
    triplets: &mut Vec<(usize, usize, f64)>,
    local: [usize; 3],
    positions: [Point3<f64>; 3],
) {
    let e1 = positions[1] - positions[0];
    let e2 = positions[2] - positions[0];

    let cross = e1.cross(&e2);
    if 0.5 * cross.norm() < AREA_EPSILON {
        return; // degenerate
    }

    let normal = cross.normalize();
    let u_axis = e1.normalize();
    let v_axis = normal.cross(&u_axis);

    // Local coordinates: q0 at the origin, q1 on the u axis.
    let q = [
        Point2::new(0.0, 0.0),
        Point2::new(e1.dot(&u_axis), e1.dot(&v_axis)),
        Point2::new(e2.dot(&u_axis), e2.dot(&v_axis)),
    ];

    let area = 0.5 * (q[1].x * q[2].y - q[1].y * q[2].x).abs();
    if area < AREA_EPSILON {
        return;
    }

    for (i, j) in [(0usize, 1usize), (1, 2), (2, 0)] {
        let dx = q[j].x - q[i].x;
        let dy = q[j].y - q[i].y;
        let (ri, rj) = (2 * local[i], 2 * local[j]);

        triplets.push((ri, rj, area * dx));
        triplets.push((ri, rj + 1, area * dy));
        triplets.push((ri + 1, rj, area * dy));
        triplets.push((ri + 1, rj + 1, -area * dx));

        triplets.push((ri, ri, -area * dx));
        triplets.push((ri, ri + 1, -area * dy));
        triplets.push((ri + 1, ri, -area * dy));
        triplets.push((ri + 1, ri + 1, area * dx));
    }
}

/// Choose the two pin vertices (local indices).
///
/// Boundary vertices are those incident to an edge used by exactly one of
/// the island's triangles. With two or more boundary vertices, the pair at
/// maximum 3D distance among them is chosen; otherwise the maximum-distance
/// pair over all local vertices. Ties resolve to the lowest index pair.
fn select_pins(
    mesh: &Mesh,
    faces: &[usize],
    global_to_local: &HashMap<usize, usize>,
    local_to_global: &[usize],
) -> (usize, usize) {
    let n = local_to_global.len();

    // Count each undirected edge's occurrences among the island triangles.
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for &f in faces {
        let tri = mesh.triangles()[f];
        for i in 0..3 {
            let a = global_to_local[&tri[i]];
            let b = global_to_local[&tri[(i + 1) % 3]];
            let key = if a < b { (a, b) } else { (b, a) };
            *edge_count.entry(key).or_insert(0) += 1;
        }
    }

    let mut is_boundary = vec![false; n];
    for (&(a, b), &count) in &edge_count {
        if count == 1 {
            is_boundary[a] = true;
            is_boundary[b] = true;
        }
    }
    let boundary: Vec<usize> = (0..n).filter(|&v| is_boundary[v]).collect();

    // Closed patch: fall back to all vertices.
    let verts: Vec<usize> = if boundary.len() >= 2 {
        boundary
    } else {
        (0..n).collect()
    };

    let mut best = (verts[0], verts[1]);
    let mut max_dist = 0.0f64;
    for (i, &a) in verts.iter().enumerate() {
        for &b in verts.iter().skip(i + 1) {
            let pa = mesh.position(local_to_global[a]);
            let pb = mesh.position(local_to_global[b]);
            let dist = (pb - pa).norm_squared();
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Translate and scale `uvs` so their bounding box becomes [0,1]×[0,1].
///
/// An axis whose range is below [`RANGE_EPSILON`] keeps its extent (the
/// range is treated as 1.0) to avoid dividing by a vanishing span.
fn normalize_unit_square(uvs: &mut [Point2<f64>]) {
    if uvs.is_empty() {
        return;
    }

    let mut min_u = f64::MAX;
    let mut max_u = f64::MIN;
    let mut min_v = f64::MAX;
    let mut max_v = f64::MIN;
    for uv in uvs.iter() {
        min_u = min_u.min(uv.x);
        max_u = max_u.max(uv.x);
        min_v = min_v.min(uv.y);
        max_v = max_v.max(uv.y);
    }

    let mut u_range = max_u - min_u;
    let mut v_range = max_v - min_v;
    if u_range < RANGE_EPSILON {
        u_range = 1.0;
    }
    if v_range < RANGE_EPSILON {
        v_range = 1.0;
    }

    for uv in uvs.iter_mut() {
        uv.x = (uv.x - min_u) / u_range;
        uv.y = (uv.y - min_v) / v_range;
    }
}
