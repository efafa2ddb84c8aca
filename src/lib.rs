// src/lib.rs
//! scmodel
//!
//! Exporter and loader for `.scmodel`, a flat little-endian model format that
//! carries a scene's named markers, render geometry and collision triangles in
//! world space.
//!
//! Objects are sorted into sections by the first character of their name:
//! `@` markers, `^` geometries, `%` collision. Everything else is left out.

pub mod error;
pub mod export;
pub mod format;
pub mod prelude;
pub mod scene;

// Re-export main types for convenience
pub use export::{export, ExportSummary, Exporter};
pub use format::ModelData;
pub use scene::{Scene, SceneObject};
