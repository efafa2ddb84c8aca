//! # Mesh Data
//!
//! Mesh representations handed to the exporter. [`MeshData`] is what a scene
//! object owns: vertices, arbitrary polygons and UV layers. [`Mesh`] is the
//! evaluated form produced for one export run, with every polygon reduced to a
//! triangle or quad [`Face`].

use cgmath::{Point3, Vector3};

use crate::error::MeshError;
use crate::format::{QUAD_FAN, TRIANGLE_FAN};

/// A mesh vertex in object (local) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Local-space position
    pub position: Point3<f32>,
    /// Vertex normal, used for smooth-shaded faces
    pub normal: Vector3<f32>,
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            position: Point3::from(position),
            normal: Vector3::from(normal),
        }
    }
}

/// A polygon with any number of corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertex indices, one per corner, in winding order
    pub vertices: Vec<u32>,
    /// Flat normal of the polygon
    pub normal: Vector3<f32>,
    /// Whether the polygon is smooth shaded
    pub smooth: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<u32>, normal: [f32; 3], smooth: bool) -> Self {
        Self {
            vertices,
            normal: Vector3::from(normal),
            smooth,
        }
    }
}

/// A named set of per-corner texture coordinates.
///
/// `uvs[p][c]` is the coordinate for corner `c` of polygon `p`. Missing
/// entries read as `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UvLayer {
    pub name: String,
    pub uvs: Vec<Vec<[f32; 2]>>,
}

impl UvLayer {
    pub fn new(name: impl Into<String>, uvs: Vec<Vec<[f32; 2]>>) -> Self {
        Self {
            name: name.into(),
            uvs,
        }
    }

    fn corner(&self, polygon: usize, corner: usize) -> [f32; 2] {
        self.uvs
            .get(polygon)
            .and_then(|corners| corners.get(corner))
            .copied()
            .unwrap_or([0.0, 0.0])
    }
}

/// Vertex indices of a tessellated face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCorners {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl FaceCorners {
    /// Vertex indices in corner order.
    pub fn indices(&self) -> &[u32] {
        match self {
            FaceCorners::Triangle(v) => v.as_slice(),
            FaceCorners::Quad(v) => v.as_slice(),
        }
    }

    /// Corner order used to split this face into triangles.
    ///
    /// Quads become `(0,1,2)` and `(2,3,0)`, triangles stay `(0,1,2)`.
    pub fn fan(&self) -> &'static [usize] {
        match self {
            FaceCorners::Triangle(_) => &TRIANGLE_FAN,
            FaceCorners::Quad(_) => &QUAD_FAN,
        }
    }

    /// Vertex index for each fan corner, in emission order.
    pub fn fan_vertices(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        let indices = self.indices();
        self.fan().iter().map(move |&corner| (corner, indices[corner]))
    }
}

/// A triangle or quad produced by tessellation.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub corners: FaceCorners,
    pub normal: Vector3<f32>,
    pub smooth: bool,
    /// Per-corner UVs from the active layer, `None` when the mesh has no UV layer
    pub uvs: Option<[[f32; 2]; 4]>,
}

impl Face {
    pub fn triangle(vertices: [u32; 3], normal: [f32; 3], smooth: bool) -> Self {
        Self {
            corners: FaceCorners::Triangle(vertices),
            normal: Vector3::from(normal),
            smooth,
            uvs: None,
        }
    }

    pub fn quad(vertices: [u32; 4], normal: [f32; 3], smooth: bool) -> Self {
        Self {
            corners: FaceCorners::Quad(vertices),
            normal: Vector3::from(normal),
            smooth,
            uvs: None,
        }
    }

    pub fn with_uvs(mut self, uvs: [[f32; 2]; 4]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// UV for one corner, `(0, 0)` when the face has none.
    pub fn uv(&self, corner: usize) -> [f32; 2] {
        self.uvs.map(|uvs| uvs[corner]).unwrap_or([0.0, 0.0])
    }
}

/// Mesh data owned by a scene object.
///
/// The geometry fields are public for building and editing meshes. A cached
/// tessellation is not refreshed by such edits, call
/// [`MeshData::invalidate_tessellation`] after changing a cached mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub polygons: Vec<Polygon>,
    pub uv_layers: Vec<UvLayer>,
    /// Index into `uv_layers` of the layer that gets exported
    pub active_uv_layer: Option<usize>,
    tessellation: Option<Vec<Face>>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, polygons: Vec<Polygon>) -> Self {
        Self {
            vertices,
            polygons,
            ..Default::default()
        }
    }

    /// Adds a UV layer and makes it the active one.
    pub fn with_uv_layer(mut self, layer: UvLayer) -> Self {
        self.uv_layers.push(layer);
        self.active_uv_layer = Some(self.uv_layers.len() - 1);
        self.invalidate_tessellation();
        self
    }

    pub fn active_uv_layer(&self) -> Option<&UvLayer> {
        self.active_uv_layer.and_then(|i| self.uv_layers.get(i))
    }

    /// Cached tessellation, if one has been computed.
    pub fn tessellation(&self) -> Option<&[Face]> {
        self.tessellation.as_deref()
    }

    /// Computes and caches the tessellation. Calling it again is a no-op.
    ///
    /// Evaluators prefer the cache over the polygons, so it must be dropped
    /// with [`MeshData::invalidate_tessellation`] before `vertices`,
    /// `polygons` or the UV layers change.
    pub fn cache_tessellation(&mut self) -> Result<&[Face], MeshError> {
        if self.tessellation.is_none() {
            self.tessellation = Some(self.tessellate()?);
        }
        Ok(self.tessellation.as_deref().unwrap_or_default())
    }

    /// Drops the cached tessellation so the next request rebuilds it.
    pub fn invalidate_tessellation(&mut self) {
        self.tessellation = None;
    }

    /// Splits every polygon into triangle and quad faces.
    ///
    /// Triangles and quads are kept as they are. Larger polygons become a
    /// triangle fan around their first corner.
    pub fn tessellate(&self) -> Result<Vec<Face>, MeshError> {
        let layer = self.active_uv_layer();
        let mut faces = Vec::with_capacity(self.polygons.len());

        for (index, polygon) in self.polygons.iter().enumerate() {
            let corners = polygon.vertices.len();
            if corners < 3 {
                return Err(MeshError::DegeneratePolygon {
                    polygon: index,
                    corners,
                });
            }
            if let Some(&vertex) = polygon
                .vertices
                .iter()
                .find(|&&v| v as usize >= self.vertices.len())
            {
                return Err(MeshError::VertexOutOfRange {
                    polygon: index,
                    vertex,
                    vertex_count: self.vertices.len(),
                });
            }

            let uvs_for = |picked: &[usize]| {
                layer.map(|layer| {
                    let mut uvs = [[0.0; 2]; 4];
                    for (slot, &corner) in picked.iter().enumerate() {
                        uvs[slot] = layer.corner(index, corner);
                    }
                    uvs
                })
            };

            let v = &polygon.vertices;
            match corners {
                3 => faces.push(Face {
                    corners: FaceCorners::Triangle([v[0], v[1], v[2]]),
                    normal: polygon.normal,
                    smooth: polygon.smooth,
                    uvs: uvs_for(&[0, 1, 2]),
                }),
                4 => faces.push(Face {
                    corners: FaceCorners::Quad([v[0], v[1], v[2], v[3]]),
                    normal: polygon.normal,
                    smooth: polygon.smooth,
                    uvs: uvs_for(&[0, 1, 2, 3]),
                }),
                _ => {
                    for i in 1..corners - 1 {
                        faces.push(Face {
                            corners: FaceCorners::Triangle([v[0], v[i], v[i + 1]]),
                            normal: polygon.normal,
                            smooth: polygon.smooth,
                            uvs: uvs_for(&[0, i, i + 1]),
                        });
                    }
                }
            }
        }

        Ok(faces)
    }
}

/// An evaluated, fully tessellated mesh for one object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Checks that every face index points at an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        validate_faces(&self.faces, self.vertices.len())
    }
}

pub(crate) fn validate_faces(faces: &[Face], vertex_count: usize) -> Result<(), MeshError> {
    for (index, face) in faces.iter().enumerate() {
        if let Some(&vertex) = face
            .corners
            .indices()
            .iter()
            .find(|&&v| v as usize >= vertex_count)
        {
            return Err(MeshError::VertexOutOfRange {
                polygon: index,
                vertex,
                vertex_count,
            });
        }
    }
    Ok(())
}
