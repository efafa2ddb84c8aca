//! Object classification by name prefix.

use crate::scene::SceneObject;

/// Prefix of marker object names.
pub const MARKER_PREFIX: char = '@';
/// Prefix of render geometry object names.
pub const GEOMETRY_PREFIX: char = '^';
/// Prefix of collision object names.
pub const COLLISION_PREFIX: char = '%';

/// Export category of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Marker,
    Geometry,
    Collision,
    Unclassified,
}

impl ObjectKind {
    /// Classifies an object by the first character of its name.
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some(MARKER_PREFIX) => ObjectKind::Marker,
            Some(GEOMETRY_PREFIX) => ObjectKind::Geometry,
            Some(COLLISION_PREFIX) => ObjectKind::Collision,
            _ => ObjectKind::Unclassified,
        }
    }
}

/// Scene objects partitioned by category, each sorted by name.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub markers: Vec<&'a SceneObject>,
    pub geometries: Vec<&'a SceneObject>,
    pub collisions: Vec<&'a SceneObject>,
    /// Number of objects that fell in no category
    pub unclassified: usize,
}

/// Partitions `objects` into markers, geometries and collisions.
///
/// Objects without a recognised prefix are counted and dropped.
pub fn classify<'a, I>(objects: I) -> Classified<'a>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    let mut classified = Classified::default();

    for object in objects {
        match ObjectKind::of(&object.name) {
            ObjectKind::Marker => classified.markers.push(object),
            ObjectKind::Geometry => classified.geometries.push(object),
            ObjectKind::Collision => classified.collisions.push(object),
            ObjectKind::Unclassified => {
                log::debug!("Skipping unclassified object '{}'", object.name);
                classified.unclassified += 1;
            }
        }
    }

    for list in [
        &mut classified.markers,
        &mut classified.geometries,
        &mut classified.collisions,
    ] {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }

    classified
}
