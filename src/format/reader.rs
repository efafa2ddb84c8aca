//! # Model Loading
//!
//! Reads a `.scmodel` file back into lookup tables, the way the game consumes
//! it: markers and geometries by name, collision as one triangle soup.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use cgmath::Vector3;

use super::{COLLISION_VERTEX_SIZE, GEOMETRY_VERTEX_SIZE};
use crate::error::LoadError;

/// Upper bound on memory reserved up front from a count read off the file.
const RESERVE_LIMIT: usize = 1 << 21;

/// A named point of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Vector3<f32>,
    /// Local X axis in world space
    pub x_axis: Vector3<f32>,
    /// Local Z axis in world space
    pub z_axis: Vector3<f32>,
}

impl Marker {
    /// Rebuilds the local Y axis, which the file does not store.
    pub fn y_axis(&self) -> Vector3<f32> {
        self.z_axis.cross(self.x_axis)
    }
}

/// One vertex of a render geometry, laid out for direct GPU upload.
///
/// The `#[repr(C)]` attribute keeps the field order and packing identical to
/// the file: 32 bytes, position then normal then uv.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GeometryVertex {
    /// World-space position [x, y, z]
    pub position: [f32; 3],
    /// Normal vector [nx, ny, nz]
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub uv: [f32; 2],
}

/// A render geometry as a flat triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    pub vertices: Vec<GeometryVertex>,
}

impl Geometry {
    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw vertex bytes, ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector3<f32>; 3],
}

/// Merged collision triangles of every collision object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collision {
    pub triangles: Vec<Triangle>,
}

/// Contents of a loaded `.scmodel` file.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    markers: HashMap<String, Marker>,
    geometries: HashMap<String, Geometry>,
    collision: Collision,
}

impl ModelData {
    /// Loads a model file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a complete model from `reader`.
    ///
    /// Markers sharing a name keep the first record, geometries sharing a
    /// name keep the last. The reader must end exactly after the collision
    /// section.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut model = ModelData::default();

        let marker_count = reader.read_u32::<LittleEndian>()?;
        for _ in 0..marker_count {
            let name = read_name(&mut reader)?;
            let marker = Marker {
                position: read_vec3(&mut reader)?,
                x_axis: read_vec3(&mut reader)?,
                z_axis: read_vec3(&mut reader)?,
            };
            match model.markers.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(marker);
                }
                Entry::Occupied(slot) => {
                    log::warn!("Marker '{}' appears more than once, keeping the first", slot.key());
                }
            }
        }

        let geometry_count = reader.read_u32::<LittleEndian>()?;
        for _ in 0..geometry_count {
            let name = read_name(&mut reader)?;
            let vertex_count = reader.read_u32::<LittleEndian>()?;

            // Cap the reservation, the count is untrusted input
            let mut vertices =
                Vec::with_capacity((vertex_count as usize).min(RESERVE_LIMIT / GEOMETRY_VERTEX_SIZE));
            for _ in 0..vertex_count {
                vertices.push(GeometryVertex {
                    position: read_vec3(&mut reader)?.into(),
                    normal: read_vec3(&mut reader)?.into(),
                    uv: [
                        reader.read_f32::<LittleEndian>()?,
                        reader.read_f32::<LittleEndian>()?,
                    ],
                });
            }

            if model
                .geometries
                .insert(name.clone(), Geometry { vertices })
                .is_some()
            {
                log::warn!("Geometry '{}' appears more than once, keeping the last", name);
            }
        }

        let triangle_count = reader.read_u32::<LittleEndian>()?;
        let triangles = &mut model.collision.triangles;
        triangles.reserve((triangle_count as usize).min(RESERVE_LIMIT / (3 * COLLISION_VERTEX_SIZE)));
        for _ in 0..triangle_count {
            triangles.push(Triangle {
                points: [
                    read_vec3(&mut reader)?,
                    read_vec3(&mut reader)?,
                    read_vec3(&mut reader)?,
                ],
            });
        }

        let trailing = std::io::copy(&mut reader, &mut std::io::sink())?;
        if trailing > 0 {
            return Err(LoadError::TrailingData(trailing));
        }

        log::debug!(
            "Loaded model: {} markers, {} geometries, {} collision triangles",
            model.markers.len(),
            model.geometries.len(),
            model.collision.triangles.len()
        );

        Ok(model)
    }

    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.get(name)
    }

    pub fn find_geometry(&self, name: &str) -> Option<&Geometry> {
        self.geometries.get(name)
    }

    pub fn collision(&self) -> &Collision {
        &self.collision
    }

    pub fn markers(&self) -> impl Iterator<Item = (&str, &Marker)> {
        self.markers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn geometries(&self) -> impl Iterator<Item = (&str, &Geometry)> {
        self.geometries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn read_name<R: Read>(reader: &mut R) -> std::io::Result<String> {
    let len = reader.read_u8()? as usize;
    let mut bytes = vec![0; len];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_vec3<R: Read>(reader: &mut R) -> std::io::Result<Vector3<f32>> {
    Ok(Vector3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}
