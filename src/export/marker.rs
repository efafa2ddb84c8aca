//! Marker section encoder.

use std::io::{Seek, Write};

use cgmath::{InnerSpace, Matrix3, Matrix4, Quaternion, SquareMatrix, Vector3, Zero};

use super::section_count;
use crate::error::ExportError;
use crate::format::{encode_name, ModelWriter};
use crate::scene::SceneObject;

/// Translation, rotation and scale of an affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vector3<f32>,
    pub rotation: Matrix3<f32>,
    pub scale: Vector3<f32>,
}

/// Splits `m` into translation, rotation and scale.
///
/// Scale is the length of each basis column, negated when the basis is
/// mirrored. The rotation is the normalized basis passed through a unit
/// quaternion, so sheared or degenerate inputs still yield some rotation.
/// Zero-length columns are left at zero rather than producing NaN.
pub fn decompose(m: &Matrix4<f32>) -> Decomposed {
    let translation = m.w.truncate();
    let basis = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());

    let mut scale = Vector3::new(
        basis.x.magnitude(),
        basis.y.magnitude(),
        basis.z.magnitude(),
    );

    let unit = |column: Vector3<f32>, length: f32| {
        if length > 0.0 {
            column / length
        } else {
            Vector3::zero()
        }
    };
    let mut normalized = Matrix3::from_cols(
        unit(basis.x, scale.x),
        unit(basis.y, scale.y),
        unit(basis.z, scale.z),
    );

    if basis.determinant() < 0.0 {
        scale = -scale;
        normalized = -normalized;
    }

    let quaternion = Quaternion::from(normalized);
    let rotation = if quaternion.magnitude2() > 0.0 {
        Matrix3::from(quaternion.normalize())
    } else {
        Matrix3::identity()
    };

    Decomposed {
        translation,
        rotation,
        scale,
    }
}

/// Writes the marker count followed by one record per marker.
///
/// Each record holds the name, world position, and the rotation's first and
/// third columns (local X and Z axes). Scale is discarded.
pub fn write_markers<W: Write + Seek>(
    out: &mut ModelWriter<W>,
    markers: &[&SceneObject],
) -> Result<(), ExportError> {
    out.write_u32(section_count("marker", markers.len())?)?;

    for object in markers {
        let Decomposed {
            translation,
            rotation,
            ..
        } = decompose(&object.world_transform);

        out.write_name(&encode_name(&object.name))?;
        out.write_vec3(translation)?;
        out.write_vec3(rotation.x)?;
        out.write_vec3(rotation.z)?;

        log::debug!("Marker '{}' at {:?}", object.name, translation);
    }

    Ok(())
}
