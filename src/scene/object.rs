use cgmath::{Deg, Euler, Matrix4, Quaternion, SquareMatrix, Vector3};

use super::mesh::MeshData;

/// A named object in the scene with its world transform and optional mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    /// Full object-to-world transform (cgmath matrices are column-major)
    pub world_transform: Matrix4<f32>,
    pub mesh: Option<MeshData>,
}

impl SceneObject {
    /// Create a new object with identity transformation and no mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world_transform: Matrix4::identity(),
            mesh: None,
        }
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.world_transform = transform;
        self
    }

}

/// Builds `T * R * S` from its parts.
pub fn compose_trs(
    translation: Vector3<f32>,
    rotation: Euler<Deg<f32>>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    let t = Matrix4::from_translation(translation);
    let r = Matrix4::from(Quaternion::from(rotation));
    let s = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    t * r * s // Order matters: T * R * S
}
