//! Benchmarks for the unwrapping pipeline.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use seamster::algo::unwrap::{unwrap, UnwrapOptions};
use seamster::mesh::{Mesh, Topology};

/// Lat-long sphere: `segments * (rings - 1) + 2` vertices, closed.
fn create_uv_sphere(segments: usize, rings: usize) -> Mesh {
    let mut positions = Vec::new();
    let mut triangles = Vec::new();

    positions.push(Point3::new(0.0, 1.0, 0.0));
    for ring in 1..rings {
        let theta = std::f64::consts::PI * ring as f64 / rings as f64;
        let (ring_radius, y) = (theta.sin(), theta.cos());
        for seg in 0..segments {
            let phi = 2.0 * std::f64::consts::PI * seg as f64 / segments as f64;
            positions.push(Point3::new(ring_radius * phi.cos(), y, ring_radius * phi.sin()));
        }
    }
    positions.push(Point3::new(0.0, -1.0, 0.0));

    for seg in 0..segments {
        triangles.push([0, 1 + seg, 1 + (seg + 1) % segments]);
    }
    for ring in 0..rings - 2 {
        let start = 1 + ring * segments;
        let next = 1 + (ring + 1) * segments;
        for seg in 0..segments {
            let v0 = start + seg;
            let v1 = next + seg;
            let v2 = next + (seg + 1) % segments;
            let v3 = start + (seg + 1) % segments;
            triangles.push([v0, v1, v2]);
            triangles.push([v0, v2, v3]);
        }
    }
    let bottom = positions.len() - 1;
    let last = 1 + (rings - 2) * segments;
    for seg in 0..segments {
        triangles.push([last + seg, bottom, last + (seg + 1) % segments]);
    }

    Mesh::new(positions, triangles).unwrap()
}

fn bench_topology(c: &mut Criterion) {
    let mesh = create_uv_sphere(32, 24);

    c.bench_function("topology_sphere_32x24", |b| {
        b.iter(|| Topology::build(&mesh));
    });
}

fn bench_unwrap(c: &mut Criterion) {
    let small = create_uv_sphere(8, 6);
    let medium = create_uv_sphere(16, 12);
    let options = UnwrapOptions::default();

    c.bench_function("unwrap_sphere_8x6", |b| {
        b.iter(|| unwrap(&small, &options).unwrap());
    });

    c.bench_function("unwrap_sphere_16x12", |b| {
        b.iter(|| unwrap(&medium, &options).unwrap());
    });
}

criterion_group!(benches, bench_topology, bench_unwrap);
criterion_main!(benches);
