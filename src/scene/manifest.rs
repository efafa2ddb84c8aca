//! # Scene Manifest
//!
//! A RON description of a scene to export: object names, transforms and the
//! OBJ files their meshes come from.
//!
//! ```ron
//! (
//!     objects: [
//!         (name: "@Spawn", translation: (1.0, 2.0, 3.0)),
//!         (name: "^Board", mesh: Some("board.obj"), model: Some("Board")),
//!         (name: "%Floor", mesh: Some("floor.obj"), scale: (10.0, 10.0, 1.0)),
//!     ],
//! )
//! ```
//!
//! Mesh paths are resolved relative to the manifest file.

use std::fs;
use std::path::{Path, PathBuf};

use cgmath::{Deg, Euler, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use super::obj_import;
use super::object::{compose_trs, SceneObject};
use super::scene::Scene;
use crate::error::ManifestError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub objects: Vec<ObjectEntry>,
}

/// One object of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object name, including its category prefix
    pub name: String,
    #[serde(default)]
    pub translation: (f32, f32, f32),
    /// XYZ Euler angles in degrees
    #[serde(default)]
    pub rotation_degrees: (f32, f32, f32),
    #[serde(default = "unit_scale")]
    pub scale: (f32, f32, f32),
    /// OBJ file providing the mesh
    #[serde(default)]
    pub mesh: Option<PathBuf>,
    /// Model inside the OBJ file, defaults to the first one
    #[serde(default)]
    pub model: Option<String>,
}

fn unit_scale() -> (f32, f32, f32) {
    (1.0, 1.0, 1.0)
}

impl ObjectEntry {
    pub fn transform(&self) -> Matrix4<f32> {
        let (tx, ty, tz) = self.translation;
        let (rx, ry, rz) = self.rotation_degrees;
        let (sx, sy, sz) = self.scale;
        compose_trs(
            Vector3::new(tx, ty, tz),
            Euler::new(Deg(rx), Deg(ry), Deg(rz)),
            Vector3::new(sx, sy, sz),
        )
    }
}

impl SceneManifest {
    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        Ok(ron::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Builds the scene, loading meshes relative to `base_dir`.
    pub fn build_scene(&self, base_dir: &Path) -> Result<Scene, ManifestError> {
        let mut scene = Scene::new();

        for entry in &self.objects {
            let mut object = match &entry.mesh {
                Some(mesh_path) => {
                    let path = base_dir.join(mesh_path);
                    let mut models = obj_import::load_obj(&path, entry.transform())?;
                    let index = match &entry.model {
                        Some(model) => models.iter().position(|m| &m.name == model).ok_or_else(
                            || ManifestError::MissingModel {
                                path: path.clone(),
                                model: model.clone(),
                            },
                        )?,
                        None if models.is_empty() => {
                            return Err(ManifestError::MissingModel {
                                path,
                                model: String::from("<first>"),
                            })
                        }
                        None => 0,
                    };
                    models.swap_remove(index)
                }
                None => SceneObject::new(entry.name.clone())
                    .with_transform(entry.transform()),
            };
            object.name = entry.name.clone();

            log::debug!("Manifest object '{}'", object.name);
            scene.add(object);
        }

        Ok(scene)
    }
}

/// Loads a manifest file and builds its scene.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, ManifestError> {
    let path = path.as_ref();
    let manifest = SceneManifest::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    manifest.build_scene(base_dir)
}
