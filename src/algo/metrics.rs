//! Quality metrics for UV mappings.
//!
//! Two measures of a finished parameterization: *stretch*, the singular
//! value ratio of the per-triangle UV→3D Jacobian (1.0 means the mapping is
//! locally a similarity), and *coverage*, the fraction of [0,1]² actually
//! occupied by UV triangles.

use nalgebra::{Point2, Vector3};

use crate::mesh::Mesh;

/// Aggregate stretch over all measurable triangles.
#[derive(Debug, Clone, Copy)]
pub struct StretchStats {
    /// Mean per-triangle stretch.
    pub avg: f32,
    /// Worst per-triangle stretch.
    pub max: f32,
}

/// Compute average and maximum stretch across the mesh.
///
/// Per triangle, the UV→3D Jacobian is recovered from the edge vectors and
/// its singular values σ1 ≥ σ2 taken from the closed-form eigenvalues of
/// JᵀJ; the triangle's stretch is σ1/σ2. Triangles that are degenerate in
/// UV or 3D space are skipped. Returns 1.0/1.0 when the mesh has no UVs or
/// no measurable triangle.
pub fn compute_stretch(mesh: &Mesh) -> StretchStats {
    let identity = StretchStats { avg: 1.0, max: 1.0 };
    let Some(uvs) = mesh.uvs() else {
        return identity;
    };

    let mut sum = 0.0f64;
    let mut max = 0.0f64;
    let mut count = 0usize;

    for tri in mesh.triangles() {
        let [p0, p1, p2] = [
            mesh.position(tri[0]),
            mesh.position(tri[1]),
            mesh.position(tri[2]),
        ];
        let dp1 = p1 - p0;
        let dp2 = p2 - p0;

        let uv = |v: usize| Point2::new(uvs[v].x as f64, uvs[v].y as f64);
        let duv1 = uv(tri[1]) - uv(tri[0]);
        let duv2 = uv(tri[2]) - uv(tri[0]);

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det.abs() < 1e-12 {
            continue; // UV-degenerate
        }

        // J = [dp1 | dp2] · inv([duv1 | duv2]), columns ∂P/∂u and ∂P/∂v.
        let ju: Vector3<f64> = (dp1 * duv2.y - dp2 * duv1.y) / det;
        let jv: Vector3<f64> = (dp2 * duv1.x - dp1 * duv2.x) / det;

        // Singular values from the 2x2 JᵀJ eigenvalues.
        let a = ju.dot(&ju);
        let b = ju.dot(&jv);
        let c = jv.dot(&jv);
        let disc = ((a - c) * (a - c) + 4.0 * b * b).sqrt();
        let sigma1 = (0.5 * (a + c + disc)).max(0.0).sqrt();
        let sigma2 = (0.5 * (a + c - disc)).max(0.0).sqrt();
        if sigma2 < 1e-12 {
            continue; // 3D-degenerate
        }

        let stretch = sigma1 / sigma2;
        sum += stretch;
        max = max.max(stretch);
        count += 1;
    }

    if count == 0 {
        return identity;
    }
    StretchStats {
        avg: (sum / count as f64) as f32,
        max: max as f32,
    }
}

/// Fraction of [0,1]² covered by the mesh's UV triangles.
///
/// Rasterizes onto a `resolution`×`resolution` grid, testing each pixel
/// center inside the triangle's bounding box with a sign-consistent edge
/// function (either winding counts). Returns 0.0 when the mesh has no UVs.
pub fn compute_coverage(mesh: &Mesh, resolution: usize) -> f32 {
    let Some(uvs) = mesh.uvs() else {
        return 0.0;
    };
    if resolution == 0 {
        return 0.0;
    }

    let res = resolution as f64;
    let mut grid = vec![false; resolution * resolution];

    for tri in mesh.triangles() {
        // Triangle corners in pixel space.
        let p: Vec<Point2<f64>> = tri
            .iter()
            .map(|&v| Point2::new(uvs[v].x as f64 * res, uvs[v].y as f64 * res))
            .collect();

        let area2 = (p[1].x - p[0].x) * (p[2].y - p[0].y)
            - (p[1].y - p[0].y) * (p[2].x - p[0].x);
        if area2.abs() < 1e-12 {
            continue;
        }

        let clamp = |v: f64| (v.max(0.0) as usize).min(resolution - 1);
        let x0 = clamp(p.iter().map(|q| q.x).fold(f64::MAX, f64::min).floor());
        let x1 = clamp(p.iter().map(|q| q.x).fold(f64::MIN, f64::max).ceil());
        let y0 = clamp(p.iter().map(|q| q.y).fold(f64::MAX, f64::min).floor());
        let y1 = clamp(p.iter().map(|q| q.y).fold(f64::MIN, f64::max).ceil());

        for y in y0..=y1 {
            for x in x0..=x1 {
                let cx = x as f64 + 0.5;
                let cy = y as f64 + 0.5;
                let edge = |a: Point2<f64>, b: Point2<f64>| {
                    (b.x - a.x) * (cy - a.y) - (b.y - a.y) * (cx - a.x)
                };
                let d0 = edge(p[0], p[1]);
                let d1 = edge(p[1], p[2]);
                let d2 = edge(p[2], p[0]);
                let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
                let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
                if !(has_neg && has_pos) {
                    grid[y * resolution + x] = true;
                }
            }
        }
    }

    let covered = grid.iter().filter(|&&c| c).count();
    covered as f32 / (resolution * resolution) as f32
}
