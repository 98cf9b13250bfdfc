//! Wavefront OBJ format support.
//!
//! The supported subset covers what the unwrapping pipeline consumes and
//! produces: `v x y z` positions, optional `vt u v` texture coordinates,
//! and `f` lines in the plain, `v/vt` and `v/vt/vn` index forms. Polygons
//! with more than three corners are fan-split into triangles. Indices are
//! 1-based in the file and 0-based in memory.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::error::{Result, UnwrapError};
use crate::mesh::Mesh;

/// Load a mesh from an OBJ file.
///
/// Faces with out-of-range vertex indices are dropped with a diagnostic on
/// stderr. `vt` lines are attached as per-vertex UVs only when their count
/// matches the vertex count; a mismatch warns and ignores them.
///
/// # Errors
///
/// Returns [`UnwrapError::LoadError`] when the file contains no usable
/// vertices or faces, and I/O errors for an unreadable file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut uvs: Vec<Point2<f32>> = Vec::new();
    let mut triangles: Vec<[usize; 3]> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Vec<f64> = tokens.take(3).filter_map(|t| t.parse().ok()).collect();
                if let [x, y, z] = coords[..] {
                    positions.push(Point3::new(x, y, z));
                }
            }
            Some("vt") => {
                let coords: Vec<f32> = tokens.take(2).filter_map(|t| t.parse().ok()).collect();
                if let [u, v] = coords[..] {
                    uvs.push(Point2::new(u, v));
                }
            }
            Some("f") => {
                let mut corners: Vec<usize> = Vec::new();
                let mut valid = true;
                for token in tokens {
                    // The vertex index is the part before the first slash.
                    let index = token.split('/').next().and_then(|t| t.parse::<i64>().ok());
                    match index {
                        Some(i) if i >= 1 && (i as usize) <= positions.len() => {
                            corners.push(i as usize - 1);
                        }
                        _ => {
                            valid = false;
                            break;
                        }
                    }
                }
                if !valid || corners.len() < 3 {
                    eprintln!(
                        "warning: {}: dropping invalid face line: {}",
                        path.display(),
                        line.trim()
                    );
                    continue;
                }
                // Fan split: a quad (a,b,c,d) yields (a,b,c) and (a,c,d).
                for i in 1..corners.len() - 1 {
                    triangles.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {} // comments, normals, groups, materials
        }
    }

    if positions.is_empty() || triangles.is_empty() {
        return Err(UnwrapError::LoadError {
            path: path.to_path_buf(),
            message: "no vertices or faces found".to_string(),
        });
    }

    let mut mesh = Mesh::new(positions, triangles)?;

    if !uvs.is_empty() {
        if uvs.len() == mesh.num_vertices() {
            mesh.set_uvs(uvs);
        } else {
            eprintln!(
                "warning: {}: {} texture coordinates for {} vertices, ignoring UVs",
                path.display(),
                uvs.len(),
                mesh.num_vertices()
            );
        }
    }

    Ok(mesh)
}

/// Save a mesh to an OBJ file.
///
/// Writes `v` lines, `vt` lines when the mesh carries UVs (one per vertex),
/// and `f v/v v/v v/v` faces — or plain `f v v v` without UVs.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for p in mesh.positions() {
        writeln!(writer, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }

    let has_uvs = mesh.uvs().is_some();
    if let Some(uvs) = mesh.uvs() {
        for uv in uvs {
            writeln!(writer, "vt {:.6} {:.6}", uv.x, uv.y)?;
        }
    }

    for tri in mesh.triangles() {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        if has_uvs {
            writeln!(writer, "f {}/{} {}/{} {}/{}", a, a, b, b, c, c)?;
        } else {
            writeln!(writer, "f {} {} {}", a, b, c)?;
        }
    }

    writer.flush()?;
    Ok(())
}
