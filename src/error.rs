//! # Error Types
//!
//! Errors for every fallible layer of the crate: mesh evaluation, export,
//! loading `.scmodel` files and reading scene manifests.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a mesh evaluation service.
///
/// During geometry export these are recovered from: the object is written as
/// an empty record and listed in the export summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The object carries no mesh data at all (an empty, a marker-like object).
    #[error("object has no mesh data")]
    NoMeshData,

    /// A polygon has fewer than three corners and cannot be tessellated.
    #[error("polygon {polygon} has {corners} corners, at least 3 are required")]
    DegeneratePolygon {
        /// Index of the polygon in the mesh.
        polygon: usize,
        /// Number of corners found.
        corners: usize,
    },

    /// A polygon references a vertex outside the vertex list.
    #[error("polygon {polygon} references vertex {vertex}, mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Index of the polygon in the mesh.
        polygon: usize,
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The evaluator could not produce a mesh for some other reason.
    #[error("mesh evaluation failed: {0}")]
    Evaluation(String),
}

/// Errors that abort an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Opening, writing or seeking the output stream failed.
    #[error("I/O error while writing model: {0}")]
    Io(#[from] std::io::Error),

    /// A collision object's mesh could not be tessellated.
    #[error("collision object '{object}' has an invalid mesh: {source}")]
    Mesh {
        /// Name of the offending object.
        object: String,
        /// Underlying mesh error.
        #[source]
        source: MeshError,
    },

    /// A section holds more entries than a `u32` count field can describe.
    #[error("{section} count {count} does not fit in a 32-bit field")]
    CountOverflow {
        /// Section being written.
        section: &'static str,
        /// Count that overflowed.
        count: usize,
    },
}

/// Errors raised while reading a `.scmodel` file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read, or ended before a section was complete.
    #[error("I/O error while reading model: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes remain after the collision section.
    #[error("{0} unexpected bytes after the collision section")]
    TrailingData(u64),
}

/// Errors raised while building a scene from a manifest or OBJ file.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid RON for a scene description.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// An OBJ file referenced by the manifest failed to load.
    #[error("failed to load OBJ {path}: {source}")]
    Obj {
        /// OBJ path.
        path: PathBuf,
        /// Underlying loader error.
        #[source]
        source: tobj::LoadError,
    },

    /// An object asked for a named model that the OBJ file does not contain.
    #[error("OBJ {path} has no model named '{model}'")]
    MissingModel {
        /// OBJ path.
        path: PathBuf,
        /// Requested model name.
        model: String,
    },
}
