//! # Export Pipeline
//!
//! Writes a [`Scene`] as a `.scmodel` file in one synchronous pass:
//!
//! 1. **Classify** - partition objects into markers (`@`), geometries (`^`)
//!    and collisions (`%`) by name prefix, each sorted by name
//! 2. **Markers** - fixed-size position and orientation records
//! 3. **Geometries** - world-space vertex blocks with a patched vertex count
//! 4. **Collision** - one merged triangle list with a patched triangle count
//!
//! ## Usage
//!
//! ```no_run
//! use scmodel::export::Exporter;
//! use scmodel::scene::{Scene, SceneObject};
//!
//! let mut scene = Scene::new();
//! scene.add(SceneObject::new("@Spawn"));
//!
//! let summary = Exporter::default().export(&scene, "level.scmodel")?;
//! println!("{} markers written", summary.markers);
//! # Ok::<(), scmodel::error::ExportError>(())
//! ```
//!
//! The output is byte-identical across runs for an unchanged scene.

pub mod classify;
pub mod collision;
pub mod geometry;
pub mod marker;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

pub use classify::{classify, Classified, ObjectKind};

use crate::error::ExportError;
use crate::format::{encode_name, ModelWriter};
use crate::scene::{DataMeshEvaluator, MeshEvaluator, Scene, SceneObject};

/// What an export wrote, and what it had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub markers: usize,
    pub geometries: usize,
    /// Vertices written across all geometry records
    pub geometry_vertices: usize,
    pub collision_triangles: usize,
    /// Objects exported without data because their mesh was unavailable
    pub skipped: Vec<String>,
    /// Objects with no category prefix
    pub unclassified: usize,
}

/// Exports scenes using a mesh evaluation service.
#[derive(Debug, Clone)]
pub struct Exporter<E = DataMeshEvaluator> {
    evaluator: E,
}

impl Default for Exporter<DataMeshEvaluator> {
    fn default() -> Self {
        Self::new(DataMeshEvaluator)
    }
}

impl<E: MeshEvaluator> Exporter<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Creates (or truncates) `path` and writes the scene to it.
    ///
    /// On an I/O error the partially written file is left in place.
    pub fn export(
        &self,
        scene: &Scene,
        path: impl AsRef<Path>,
    ) -> Result<ExportSummary, ExportError> {
        let path = path.as_ref();
        log::info!("Exporting {} objects to {}", scene.object_count(), path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let summary = self.export_to_writer(scene, &mut writer)?;
        writer.flush()?;

        Ok(summary)
    }

    /// Writes the scene to any seekable stream, starting at its current position.
    pub fn export_to_writer<W: Write + Seek>(
        &self,
        scene: &Scene,
        writer: W,
    ) -> Result<ExportSummary, ExportError> {
        let classified = classify(scene.objects());
        let mut summary = ExportSummary {
            markers: classified.markers.len(),
            geometries: classified.geometries.len(),
            unclassified: classified.unclassified,
            ..Default::default()
        };

        warn_duplicate_names("marker", "first", &classified.markers);
        warn_duplicate_names("geometry", "last", &classified.geometries);

        let mut out = ModelWriter::new(writer)?;
        marker::write_markers(&mut out, &classified.markers)?;
        geometry::write_geometries(&mut out, &classified.geometries, &self.evaluator, &mut summary)?;
        collision::write_collisions(&mut out, &classified.collisions, &self.evaluator, &mut summary)?;
        out.flush()?;

        log::info!(
            "Exported {} markers, {} geometries ({} vertices), {} collision triangles",
            summary.markers,
            summary.geometries,
            summary.geometry_vertices,
            summary.collision_triangles
        );
        if !summary.skipped.is_empty() {
            log::warn!(
                "{} object(s) exported without mesh data: {}",
                summary.skipped.len(),
                summary.skipped.join(", ")
            );
        }

        Ok(summary)
    }
}

/// Exports `scene` to `path` with the default mesh evaluator.
pub fn export(scene: &Scene, path: impl AsRef<Path>) -> Result<ExportSummary, ExportError> {
    Exporter::new(DataMeshEvaluator).export(scene, path)
}

/// Converts a section size into its `u32` count field.
pub(crate) fn section_count(section: &'static str, count: usize) -> Result<u32, ExportError> {
    u32::try_from(count).map_err(|_| ExportError::CountOverflow { section, count })
}

// Names collide after prefix stripping and truncation; the loader keeps only one
fn warn_duplicate_names(section: &str, kept: &str, objects: &[&SceneObject]) {
    let mut seen = HashSet::new();
    for object in objects {
        if !seen.insert(encode_name(&object.name)) {
            log::warn!(
                "Duplicate {} name '{}' after encoding, loaders keep only the {} record",
                section,
                object.name,
                kept
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::scene::{Mesh, MeshData, MeshVertex, Polygon};
    use cgmath::{Matrix4, Vector3};
    use std::io::Cursor;

    fn sample_scene() -> Scene {
        let tri = || {
            MeshData::new(
                vec![
                    MeshVertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                    MeshVertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                    MeshVertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
                ],
                vec![Polygon::new(vec![0, 1, 2], [0.0, 0.0, 1.0], false)],
            )
        };

        let mut scene = Scene::new();
        scene.add(SceneObject::new("%Floor").with_mesh(tri()));
        scene.add(SceneObject::new("^Tri").with_mesh(tri()));
        scene.add(SceneObject::new("Camera"));
        scene.add(
            SceneObject::new("@Spawn")
                .with_transform(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))),
        );
        scene
    }

    #[test]
    fn test_summary() {
        let scene = sample_scene();
        let summary = Exporter::default()
            .export_to_writer(&scene, Cursor::new(Vec::new()))
            .unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                markers: 1,
                geometries: 1,
                geometry_vertices: 3,
                collision_triangles: 1,
                skipped: Vec::new(),
                unclassified: 1,
            }
        );
    }

    #[test]
    fn test_section_sizes() {
        let scene = sample_scene();
        let mut cursor = Cursor::new(Vec::new());
        Exporter::default()
            .export_to_writer(&scene, &mut cursor)
            .unwrap();

        let markers = 4 + (1 + 5 + 36);
        let geometries = 4 + (1 + 3 + 4 + 3 * 32);
        let collision = 4 + 3 * 12;
        assert_eq!(cursor.into_inner().len(), markers + geometries + collision);
    }

    #[test]
    fn test_output_is_deterministic() {
        let scene = sample_scene();
        let mut reversed = scene.clone();
        reversed.objects.reverse();

        let run = |scene: &Scene| {
            let mut cursor = Cursor::new(Vec::new());
            export_to(scene, &mut cursor);
            cursor.into_inner()
        };
        assert_eq!(run(&scene), run(&scene));
        assert_eq!(run(&scene), run(&reversed));
    }

    fn export_to(scene: &Scene, cursor: &mut Cursor<Vec<u8>>) {
        Exporter::default().export_to_writer(scene, cursor).unwrap();
    }

    #[test]
    fn test_custom_evaluator_by_reference() {
        struct Broken;
        impl MeshEvaluator for Broken {
            fn evaluate(&self, _: &SceneObject) -> Result<Mesh, MeshError> {
                Err(MeshError::Evaluation("no depsgraph".into()))
            }
        }

        let scene = sample_scene();
        let summary = Exporter::new(&Broken)
            .export_to_writer(&scene, Cursor::new(Vec::new()))
            .unwrap();
        assert_eq!(summary.skipped, vec!["^Tri".to_string()]);
        assert_eq!(summary.geometry_vertices, 0);
        // collision tessellation does not go through evaluate
        assert_eq!(summary.collision_triangles, 1);
    }

    #[test]
    fn test_section_count_overflow() {
        assert_eq!(section_count("marker", 7).unwrap(), 7);
        if usize::BITS > 32 {
            assert!(matches!(
                section_count("marker", u32::MAX as usize + 1),
                Err(ExportError::CountOverflow { section: "marker", .. })
            ));
        }
    }
}
