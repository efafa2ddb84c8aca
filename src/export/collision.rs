//! Collision section encoder.

use std::io::{Seek, Write};

use super::geometry::to_world;
use super::{section_count, ExportSummary};
use crate::error::ExportError;
use crate::format::ModelWriter;
use crate::scene::mesh::validate_faces;
use crate::scene::{MeshEvaluator, SceneObject};

/// Writes all collision objects as one triangle list of world positions.
///
/// The leading count is the number of triangles (vertices / 3), unlike the
/// geometry section which counts vertices.
pub fn write_collisions<W, E>(
    out: &mut ModelWriter<W>,
    collisions: &[&SceneObject],
    evaluator: &E,
    summary: &mut ExportSummary,
) -> Result<(), ExportError>
where
    W: Write + Seek,
    E: MeshEvaluator + ?Sized,
{
    let triangle_count_slot = out.reserve_placeholder()?;
    let mut vertex_count: usize = 0;

    for object in collisions {
        let Some(data) = object.mesh.as_ref() else {
            log::warn!("Collision object '{}' has no mesh, skipping", object.name);
            summary.skipped.push(object.name.clone());
            continue;
        };

        let mesh_error = |source| ExportError::Mesh {
            object: object.name.clone(),
            source,
        };
        let faces = evaluator.ensure_tessellation(data).map_err(mesh_error)?;
        validate_faces(&faces, data.vertices.len()).map_err(mesh_error)?;

        let before = vertex_count;
        for face in faces.iter() {
            for (_, index) in face.corners.fan_vertices() {
                let position = data.vertices[index as usize].position;
                out.write_point3(to_world(&object.world_transform, position))?;
                vertex_count += 1;
            }
        }

        log::debug!(
            "Collision '{}': {} triangles",
            object.name,
            (vertex_count - before) / 3
        );
    }

    let triangle_count = vertex_count / 3;
    out.patch(triangle_count_slot, section_count("collision triangle", triangle_count)?)?;
    summary.collision_triangles = triangle_count;

    Ok(())
}
