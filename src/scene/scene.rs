use super::object::SceneObject;

/// Scene containing the objects to export
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates a new empty scene
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Adds an object and returns its index
    pub fn add(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Gets immutable reference to an object by name
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Gets the total number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let meshes = || self.objects.iter().filter_map(|obj| obj.mesh.as_ref());

        SceneStatistics {
            object_count: self.objects.len(),
            mesh_count: meshes().count(),
            total_vertices: meshes().map(|m| m.vertices.len()).sum(),
            total_polygons: meshes().map(|m| m.polygons.len()).sum(),
        }
    }
}

/// Scene statistics for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub mesh_count: usize,
    pub total_vertices: usize,
    pub total_polygons: usize,
}
