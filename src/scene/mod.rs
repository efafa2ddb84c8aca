//! # Scene Module
//!
//! The scene side of an export: the objects to write, their meshes, and the
//! mesh evaluation service the exporter consumes.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container of [`SceneObject`]s
//! - [`MeshData`] - Object mesh with polygons and UV layers
//! - [`Mesh`] - Evaluated, tessellated mesh handed to the encoders
//! - [`MeshEvaluator`] - Service that evaluates and tessellates meshes
//!
//! ## Usage
//!
//! Scenes are either assembled in code or loaded from a RON manifest that
//! points at OBJ files:
//!
//! ```no_run
//! use scmodel::scene::{Scene, SceneObject};
//!
//! let mut scene = Scene::new();
//! scene.add(SceneObject::new("@Spawn"));
//!
//! let loaded = scmodel::scene::load_scene("level/scene.ron").unwrap();
//! ```

pub mod evaluator;
pub mod manifest;
pub mod mesh;
pub mod obj_import;
pub mod object;
pub mod scene;

// Re-export main types
pub use evaluator::{DataMeshEvaluator, MeshEvaluator};
pub use manifest::{load_scene, ObjectEntry, SceneManifest};
pub use mesh::{Face, FaceCorners, Mesh, MeshData, MeshVertex, Polygon, UvLayer};
pub use object::SceneObject;
pub use scene::{Scene, SceneStatistics};
