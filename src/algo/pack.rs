//! Packing of UV islands into the unit square.
//!
//! Each island is reduced to its axis-aligned UV bounding box; the boxes
//! are placed into a strip of width 1.0 by a shelf packer, and a final
//! uniform scale pulls the whole arrangement back into [0,1]² when it
//! overflows. Island shapes are preserved: each island only receives a
//! translation, plus the one global scale.

use std::cmp::Ordering;

use crate::mesh::Mesh;

use super::islands::IslandAssignment;

/// Positions assigned to a list of rectangles packed into a width-1 strip.
#[derive(Debug, Clone)]
pub struct PackLayout {
    /// Bottom-left corner per rectangle, in input order.
    pub positions: Vec<(f32, f32)>,
    /// Maximum x extent reached while placing rectangles.
    pub max_width: f32,
    /// Total height of the packed strip.
    pub total_height: f32,
}

/// A strategy that places rectangles into a strip of width 1.0.
///
/// Implementations receive `(width, height)` pairs and return one position
/// per rectangle; alternative packers (MaxRects, Skyline) slot in behind
/// this trait.
pub trait RectPacker {
    /// Place `rects` into the strip and report the extents used.
    fn pack(&self, rects: &[(f32, f32)]) -> PackLayout;
}

/// Shelf packing: rectangles fill horizontal rows left to right, opening a
/// new row when the current one is full.
///
/// Rectangles are processed tallest-first (stable on ties), which bounds
/// the space wasted above shorter rectangles on each shelf. Typical
/// coverage is above 60%.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShelfPacker;

impl RectPacker for ShelfPacker {
    fn pack(&self, rects: &[(f32, f32)]) -> PackLayout {
        let mut order: Vec<usize> = (0..rects.len()).collect();
        order.sort_by(|&a, &b| {
            rects[b].1.partial_cmp(&rects[a].1).unwrap_or(Ordering::Equal)
        });

        let mut positions = vec![(0.0f32, 0.0f32); rects.len()];
        let mut shelf_x = 0.0f32;
        let mut shelf_y = 0.0f32;
        let mut shelf_height = 0.0f32;
        let mut max_width = 0.0f32;

        for &i in &order {
            let (w, h) = rects[i];
            if shelf_x + w > 1.0 && shelf_x > 0.0 {
                // Current shelf is full: open a new one above it.
                shelf_y += shelf_height;
                shelf_height = 0.0;
                shelf_x = 0.0;
            }
            positions[i] = (shelf_x, shelf_y);
            shelf_x += w;
            shelf_height = shelf_height.max(h);
            max_width = max_width.max(shelf_x);
        }

        PackLayout {
            positions,
            max_width,
            total_height: shelf_y + shelf_height,
        }
    }
}

/// Pack the islands of `mesh` into [0,1]², in place.
///
/// Uses [`ShelfPacker`]; see [`pack_islands_with`] for the general form.
pub fn pack_islands(mesh: &mut Mesh, islands: &IslandAssignment, margin: f32) {
    pack_islands_with(&ShelfPacker, mesh, islands, margin);
}

/// Pack the islands of `mesh` into [0,1]² with a chosen packer, in place.
///
/// Every vertex is owned by the first island that claims it while scanning
/// faces in order (relevant only for vertices on seams, which sit on more
/// than one island). Each island's bounding box is padded by `margin` and
/// clamped to at least `margin` per side before packing; afterwards each
/// island is translated to its slot and, when the arrangement overflows the
/// unit square, every UV is scaled down uniformly.
///
/// A mesh without UVs, or with at most one island, is left untouched.
pub fn pack_islands_with(
    packer: &dyn RectPacker,
    mesh: &mut Mesh,
    islands: &IslandAssignment,
    margin: f32,
) {
    let num_islands = islands.num_islands();
    if mesh.uvs().is_none() || num_islands <= 1 {
        // A single island is already normalized to [0,1]².
        return;
    }

    // First-claim vertex ownership, scanning faces low to high.
    let mut owner: Vec<Option<usize>> = vec![None; mesh.num_vertices()];
    for (f, tri) in mesh.triangles().iter().enumerate() {
        let island = islands.island_of(f);
        for &v in tri {
            owner[v].get_or_insert(island);
        }
    }

    // Per-island UV bounding boxes over owned vertices.
    let mut min_uv = vec![(f32::MAX, f32::MAX); num_islands];
    let mut max_uv = vec![(f32::MIN, f32::MIN); num_islands];
    {
        let uvs = mesh.uvs().expect("checked above");
        for (v, &uv) in uvs.iter().enumerate() {
            let Some(island) = owner[v] else { continue };
            let (min_u, min_v) = &mut min_uv[island];
            *min_u = min_u.min(uv.x);
            *min_v = min_v.min(uv.y);
            let (max_u, max_v) = &mut max_uv[island];
            *max_u = max_u.max(uv.x);
            *max_v = max_v.max(uv.y);
        }
    }

    let rects: Vec<(f32, f32)> = (0..num_islands)
        .map(|i| {
            if min_uv[i].0 > max_uv[i].0 {
                // No owned vertices: a margin-sized placeholder.
                (margin, margin)
            } else {
                let w = (max_uv[i].0 - min_uv[i].0 + margin).max(margin);
                let h = (max_uv[i].1 - min_uv[i].1 + margin).max(margin);
                (w, h)
            }
        })
        .collect();

    let layout = packer.pack(&rects);

    // Translate each island to its slot.
    let uvs = mesh.uvs_mut().expect("checked above");
    for (v, uv) in uvs.iter_mut().enumerate() {
        let Some(island) = owner[v] else { continue };
        if min_uv[island].0 > max_uv[island].0 {
            continue;
        }
        let (target_x, target_y) = layout.positions[island];
        uv.x += target_x - min_uv[island].0;
        uv.y += target_y - min_uv[island].1;
    }

    // One uniform scale brings an overflowing arrangement back into [0,1]².
    let extent = layout.max_width.max(layout.total_height);
    if extent > 1.0 {
        let scale = 1.0 / extent;
        for uv in uvs.iter_mut() {
            uv.x *= scale;
            uv.y *= scale;
        }
    }
}
