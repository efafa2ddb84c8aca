//! Geometry section encoder.
//!
//! Every render object becomes a record of world-space vertices with normal
//! and uv, three per triangle. Normals are written as the mesh stores them,
//! without the object's rotation applied.
// TODO: rotate normals by the inverse-transpose of the world matrix once the
// game-side loader stops compensating for object-space normals.

use std::io::{Seek, Write};

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};

use super::{section_count, ExportSummary};
use crate::error::{ExportError, MeshError};
use crate::format::{encode_name, ModelWriter};
use crate::scene::{Mesh, MeshEvaluator, SceneObject};

/// Writes the geometry count followed by one record per geometry object.
///
/// Objects whose mesh cannot be evaluated keep a zero vertex count and are
/// listed in `summary.skipped`.
pub fn write_geometries<W, E>(
    out: &mut ModelWriter<W>,
    geometries: &[&SceneObject],
    evaluator: &E,
    summary: &mut ExportSummary,
) -> Result<(), ExportError>
where
    W: Write + Seek,
    E: MeshEvaluator + ?Sized,
{
    out.write_u32(section_count("geometry", geometries.len())?)?;

    for object in geometries {
        out.write_name(&encode_name(&object.name))?;
        let vertex_count_slot = out.reserve_placeholder()?;

        let skip = |summary: &mut ExportSummary, err: MeshError| {
            log::warn!(
                "Skipping geometry '{}': {}, writing an empty record",
                object.name,
                err
            );
            summary.skipped.push(object.name.clone());
        };

        // The reserved slot already holds zero for skipped records
        let mesh = match evaluator.evaluate(object) {
            Ok(mesh) => mesh,
            Err(err) => {
                skip(summary, err);
                continue;
            }
        };
        if let Err(err) = mesh.validate() {
            evaluator.release(mesh);
            skip(summary, err);
            continue;
        }

        let written = write_mesh_vertices(out, &object.world_transform, &mesh);
        evaluator.release(mesh);
        let vertex_count = written?;

        out.patch(vertex_count_slot, section_count("geometry vertex", vertex_count)?)?;
        summary.geometry_vertices += vertex_count;

        log::debug!("Geometry '{}': {} vertices", object.name, vertex_count);
    }

    Ok(())
}

/// Emits the fan-split vertices of every face and returns how many were written.
fn write_mesh_vertices<W: Write + Seek>(
    out: &mut ModelWriter<W>,
    world: &Matrix4<f32>,
    mesh: &Mesh,
) -> Result<usize, ExportError> {
    let mut vertex_count = 0;

    for face in &mesh.faces {
        for (corner, index) in face.corners.fan_vertices() {
            let vertex = &mesh.vertices[index as usize];

            let normal: Vector3<f32> = if face.smooth {
                vertex.normal
            } else {
                face.normal
            };

            out.write_point3(to_world(world, vertex.position))?;
            out.write_vec3(normal)?;
            out.write_vec2(face.uv(corner))?;
            vertex_count += 1;
        }
    }

    Ok(vertex_count)
}

/// Applies the full affine transform to a local-space point.
pub(crate) fn to_world(world: &Matrix4<f32>, position: Point3<f32>) -> Point3<f32> {
    Point3::from_vec((world * position.to_homogeneous()).truncate())
}
