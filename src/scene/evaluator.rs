//! # Mesh Evaluation
//!
//! The exporter never reads [`MeshData`] polygons directly. It asks a
//! [`MeshEvaluator`] for an evaluated [`Mesh`] per render object, and for the
//! tessellated faces of each collision object. Hosts that apply modifiers or
//! other deferred mesh state plug in their own evaluator.

use std::borrow::Cow;

use super::mesh::{Face, Mesh, MeshData};
use super::object::SceneObject;
use crate::error::MeshError;

/// Converts scene objects into concrete triangle/quad meshes.
pub trait MeshEvaluator {
    /// Produces the evaluated mesh for one object.
    ///
    /// The returned mesh is owned by the caller for the duration of one
    /// object's export and handed back through [`MeshEvaluator::release`].
    fn evaluate(&self, object: &SceneObject) -> Result<Mesh, MeshError>;

    /// Returns tessellated faces for `mesh`, borrowing the cached
    /// tessellation when one exists. Repeated calls give the same faces.
    fn ensure_tessellation<'m>(&self, mesh: &'m MeshData) -> Result<Cow<'m, [Face]>, MeshError> {
        match mesh.tessellation() {
            Some(faces) => Ok(Cow::Borrowed(faces)),
            None => mesh.tessellate().map(Cow::Owned),
        }
    }

    /// Releases a mesh obtained from [`MeshEvaluator::evaluate`].
    fn release(&self, mesh: Mesh) {
        drop(mesh);
    }
}

/// Evaluates meshes straight from each object's [`MeshData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DataMeshEvaluator;

impl MeshEvaluator for DataMeshEvaluator {
    fn evaluate(&self, object: &SceneObject) -> Result<Mesh, MeshError> {
        let data = object.mesh.as_ref().ok_or(MeshError::NoMeshData)?;
        let faces = self.ensure_tessellation(data)?.into_owned();
        Ok(Mesh::new(data.vertices.clone(), faces))
    }
}

impl<E: MeshEvaluator + ?Sized> MeshEvaluator for &E {
    fn evaluate(&self, object: &SceneObject) -> Result<Mesh, MeshError> {
        (**self).evaluate(object)
    }

    fn ensure_tessellation<'m>(&self, mesh: &'m MeshData) -> Result<Cow<'m, [Face]>, MeshError> {
        (**self).ensure_tessellation(mesh)
    }

    fn release(&self, mesh: Mesh) {
        (**self).release(mesh)
    }
}
