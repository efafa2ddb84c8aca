//! # scmodel Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use scmodel::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = load_scene("level/scene.ron")?;
//!     let summary = Exporter::default().export(&scene, "level.scmodel")?;
//!
//!     let model = ModelData::load("level.scmodel")?;
//!     if let Some(spawn) = model.find_marker("Spawn") {
//!         println!("spawn at {:?}", spawn.position);
//!     }
//!     println!("{} triangles of collision", summary.collision_triangles);
//!     Ok(())
//! }
//! ```

// Export pipeline
pub use crate::export::{export, ExportSummary, Exporter, ObjectKind};

// Scene and mesh types
pub use crate::scene::{
    load_scene, DataMeshEvaluator, Face, FaceCorners, Mesh, MeshData, MeshEvaluator, MeshVertex,
    Polygon, Scene, SceneManifest, SceneObject, UvLayer,
};

// Loading
pub use crate::format::{Geometry, Marker, ModelData};

// Errors
pub use crate::error::{ExportError, LoadError, ManifestError, MeshError};

// Re-export common math types
pub use cgmath::{Deg, Matrix4, Point3, Vector3};
