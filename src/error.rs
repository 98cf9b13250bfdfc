//! Error types for seamster.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`UnwrapError`].
pub type Result<T> = std::result::Result<T, UnwrapError>;

/// Errors that can occur while unwrapping a mesh.
///
/// Island-level failures ([`UnwrapError::IslandTooSmall`],
/// [`UnwrapError::SingularSystem`], [`UnwrapError::NonFiniteUv`]) are caught
/// by the orchestrator, which falls back to a planar projection for the
/// affected island. Everything else aborts the pipeline.
#[derive(Error, Debug)]
pub enum UnwrapError {
    /// The mesh has no vertices or no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex index outside `[0, V)`.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// An island has fewer than three distinct vertices, which is not
    /// enough to pose the conformal system.
    #[error("island has only {vertices} vertices (need at least 3)")]
    IslandTooSmall {
        /// Number of distinct vertices in the island.
        vertices: usize,
    },

    /// Sparse LU factorization hit a zero or non-finite pivot.
    #[error("sparse LU factorization failed at column {column}")]
    SingularSystem {
        /// The column at which factorization broke down.
        column: usize,
    },

    /// The solved UV coordinates contain a NaN or infinity.
    #[error("parameterization produced non-finite UV coordinates")]
    NonFiniteUv,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
