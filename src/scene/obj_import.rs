//! # OBJ Import
//!
//! Builds scene objects from Wavefront OBJ files. Each OBJ model becomes one
//! [`SceneObject`] named after the OBJ object, so an OBJ exported with names
//! like `^Board` or `%Floor` classifies directly.
//!
//! Polygons are kept as authored (no triangulation on load) so quads reach the
//! exporter's fan split unchanged.

use std::path::Path;

use cgmath::{InnerSpace, Matrix4, Point3, Vector3, Zero};

use super::mesh::{MeshData, MeshVertex, Polygon, UvLayer};
use super::object::SceneObject;
use crate::error::ManifestError;

/// Name given to the UV layer created from OBJ texture coordinates.
pub const OBJ_UV_LAYER: &str = "UVMap";

/// Loads all models of an OBJ file as scene objects sharing `transform`.
pub fn load_obj(path: &Path, transform: Matrix4<f32>) -> Result<Vec<SceneObject>, ManifestError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: false,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| ManifestError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded {} model(s) from {}", models.len(), path.display());

    Ok(models
        .iter()
        .map(|model| {
            SceneObject::new(model.name.clone())
                .with_transform(transform)
                .with_mesh(mesh_from_obj(&model.mesh))
        })
        .collect())
}

/// Converts one tobj mesh into [`MeshData`].
///
/// Faces are smooth shaded when the OBJ supplies normals. Otherwise polygons are
/// flat with their Newell normal and vertex normals are averaged from the
/// polygons around them.
pub fn mesh_from_obj(mesh: &tobj::Mesh) -> MeshData {
    let vertex_count = mesh.positions.len() / 3;
    let has_normals = !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len();
    let has_uvs = !mesh.texcoords.is_empty() && mesh.texcoords.len() / 2 == vertex_count;

    let mut vertices: Vec<MeshVertex> = (0..vertex_count)
        .map(|i| MeshVertex {
            position: Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ),
            normal: if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::zero()
            },
        })
        .collect();

    // An empty arity list means every face is a triangle
    let arities: Vec<usize> = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
    } else {
        mesh.face_arities.iter().map(|&a| a as usize).collect()
    };

    let mut polygons = Vec::with_capacity(arities.len());
    let mut uvs = Vec::new();
    let mut start = 0;

    for arity in arities {
        let Some(corners) = mesh.indices.get(start..start + arity) else {
            log::warn!("OBJ face list is shorter than its arities, truncating mesh");
            break;
        };
        start += arity;

        let normal = newell_normal(&vertices, corners);
        polygons.push(Polygon {
            vertices: corners.to_vec(),
            normal,
            smooth: has_normals,
        });

        if has_uvs {
            uvs.push(
                corners
                    .iter()
                    .map(|&v| {
                        let v = v as usize;
                        [mesh.texcoords[v * 2], mesh.texcoords[v * 2 + 1]]
                    })
                    .collect(),
            );
        }
    }

    if !has_normals {
        accumulate_vertex_normals(&mut vertices, &polygons);
    }

    let data = MeshData::new(vertices, polygons);
    if has_uvs {
        data.with_uv_layer(UvLayer::new(OBJ_UV_LAYER, uvs))
    } else {
        data
    }
}

/// Newell's method, robust for non-planar quads and n-gons.
fn newell_normal(vertices: &[MeshVertex], corners: &[u32]) -> Vector3<f32> {
    let mut normal = Vector3::zero();
    for (i, &a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        let (Some(p), Some(q)) = (vertices.get(a as usize), vertices.get(b as usize)) else {
            continue;
        };
        let (p, q) = (p.position, q.position);
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }

    if normal.magnitude2() > 0.0 {
        normal.normalize()
    } else {
        normal
    }
}

// Average the polygon normals touching each vertex
fn accumulate_vertex_normals(vertices: &mut [MeshVertex], polygons: &[Polygon]) {
    for polygon in polygons {
        for &v in &polygon.vertices {
            if let Some(vertex) = vertices.get_mut(v as usize) {
                vertex.normal += polygon.normal;
            }
        }
    }

    for vertex in vertices.iter_mut() {
        if vertex.normal.magnitude2() > 0.0 {
            vertex.normal = vertex.normal.normalize();
        }
    }
}
