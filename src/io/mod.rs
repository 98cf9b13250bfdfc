//! Mesh file I/O.
//!
//! Wavefront OBJ is the interchange format of the unwrapping pipeline:
//! positions and faces in, positions plus per-vertex UVs out. See
//! [`obj`] for the supported subset.
//!
//! ```no_run
//! use seamster::io;
//!
//! let mesh = io::load("model.obj").unwrap();
//! io::save(&mesh, "unwrapped.obj").unwrap();
//! ```

pub mod obj;

pub use obj::{load, save};
