//! # The `.scmodel` Format
//!
//! Little-endian, no header. Three sections follow each other:
//!
//! | Section | Layout |
//! |---|---|
//! | markers | `u32` count, then per marker: name, `f32[3]` position, `f32[3]` x axis, `f32[3]` z axis |
//! | geometries | `u32` count, then per geometry: name, `u32` vertex count, per vertex `f32[3]` position, `f32[3]` normal, `f32[2]` uv |
//! | collision | `u32` triangle count, then `3 * count` `f32[3]` positions |
//!
//! A name is a `u8` length followed by that many ASCII bytes.

pub mod reader;
pub mod stream;

pub use reader::{Collision, Geometry, GeometryVertex, Marker, ModelData, Triangle};
pub use stream::{ModelWriter, Placeholder};

/// File extension, without the dot.
pub const FILE_EXTENSION: &str = "scmodel";

/// Longest name the `u8` length prefix can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Corner order for triangle faces.
pub const TRIANGLE_FAN: [usize; 3] = [0, 1, 2];

/// Corner order splitting a quad into `(0,1,2)` and `(2,3,0)`.
pub const QUAD_FAN: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Byte size of one geometry vertex: position, normal and uv.
pub const GEOMETRY_VERTEX_SIZE: usize = (3 + 3 + 2) * 4;

/// Byte size of one collision vertex.
pub const COLLISION_VERTEX_SIZE: usize = 3 * 4;

/// Encodes an object name for the file.
///
/// The category prefix character is dropped, the remainder is encoded as ASCII
/// with `?` for anything outside it, and the result is cut to
/// [`MAX_NAME_LEN`] bytes.
pub fn encode_name(name: &str) -> Vec<u8> {
    name.chars()
        .skip(1)
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .take(MAX_NAME_LEN)
        .collect()
}
