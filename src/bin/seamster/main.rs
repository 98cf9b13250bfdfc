//! Seamster CLI - UV unwrapping command-line tool.
//!
//! Usage: seamster <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `seamster --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use seamster::algo::unwrap::{unwrap, UnwrapOptions};
use seamster::io;
use seamster::mesh::Topology;

#[derive(Parser)]
#[command(name = "seamster")]
#[command(author, version, about = "UV unwrapping CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unwrap a mesh and write it back with UV coordinates
    Unwrap {
        /// Input OBJ file
        input: PathBuf,

        /// Output OBJ file
        output: PathBuf,

        /// Seam angle threshold in degrees (reserved for angular-defect
        /// seam refinement)
        #[arg(long = "angle", default_value = "30.0")]
        angle: f64,

        /// Skip islands with fewer faces than this
        #[arg(long = "min-faces", default_value = "1")]
        min_faces: usize,

        /// Pack islands into the unit square
        #[arg(long)]
        pack: bool,

        /// Spacing between packed islands, in UV units
        #[arg(long, default_value = "0.02")]
        margin: f32,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Display mesh topology information
    Info {
        /// Input OBJ file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Unwrap {
            input,
            output,
            angle,
            min_faces,
            pack,
            margin,
            sequential,
        } => {
            cmd_unwrap(&input, &output, angle, min_faces, pack, margin, sequential)?;
        }

        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_unwrap(
    input: &PathBuf,
    output: &PathBuf,
    angle: f64,
    min_faces: usize,
    pack: bool,
    margin: f32,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    println!(
        "Loaded: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );

    let options = UnwrapOptions {
        angle_threshold: angle,
        min_island_faces: min_faces,
        pack_islands: pack,
        island_margin: margin,
        parallel: !sequential,
    };

    let mode = if sequential { "sequential" } else { "parallel" };
    println!("Unwrapping ({}{})...", mode, if pack { ", packed" } else { "" });

    let start = Instant::now();
    let (unwrapped, report) = unwrap(&mesh, &options)?;
    let elapsed = start.elapsed();

    println!("Islands: {}", report.num_islands);
    println!(
        "Stretch: avg {:.2}, max {:.2}",
        report.avg_stretch, report.max_stretch
    );
    println!("Coverage: {:.1}%", report.coverage * 100.0);

    io::save(&unwrapped, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    let topo = Topology::build(&mesh);

    println!("File: {}", input.display());
    println!("Vertices: {}", topo.num_vertices());
    println!("Triangles: {}", topo.num_faces());
    println!(
        "Edges: {} ({} boundary)",
        topo.num_edges(),
        topo.num_boundary_edges()
    );
    println!("Euler characteristic: {}", topo.euler_characteristic());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    if topo.num_boundary_edges() == 0 {
        println!("Topology: Closed (no boundary)");

        // Gauss-Bonnet check: total angular defect should be 2π·χ.
        let total_defect: f64 = (0..mesh.num_vertices())
            .map(|v| mesh.angular_defect(v))
            .sum();
        println!(
            "Gauss-Bonnet Euler characteristic: {:.2}",
            total_defect / (2.0 * std::f64::consts::PI)
        );
    } else {
        println!("Topology: Open ({} boundary edges)", topo.num_boundary_edges());
    }

    println!(
        "UVs: {}",
        if mesh.uvs().is_some() { "present" } else { "absent" }
    );

    Ok(())
}
