//! Little-endian output stream with patchable count fields.

use std::io::{Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use cgmath::{Point3, Vector3};

use super::MAX_NAME_LEN;

/// A reserved `u32` slot waiting for its final value.
///
/// Obtained from [`ModelWriter::reserve_placeholder`] and consumed by
/// [`ModelWriter::patch`], so each slot is patched at most once.
#[must_use = "a reserved count must be patched"]
#[derive(Debug, PartialEq, Eq)]
pub struct Placeholder {
    offset: u64,
}

impl Placeholder {
    /// Offset of the slot from the start of the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Sequential writer for `.scmodel` data.
pub struct ModelWriter<W: Write + Seek> {
    writer: W,
    pos: u64,
}

impl<W: Write + Seek> ModelWriter<W> {
    /// Wraps a stream, appending from its current position.
    pub fn new(mut writer: W) -> std::io::Result<Self> {
        let pos = writer.stream_position()?;
        Ok(Self { writer, pos })
    }

    /// Get the current append position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn write_u8(&mut self, value: u8) -> std::io::Result<()> {
        self.writer.write_u8(value)?;
        self.pos += 1;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> std::io::Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> std::io::Result<()> {
        self.writer.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    pub fn write_vec2(&mut self, value: [f32; 2]) -> std::io::Result<()> {
        self.write_f32(value[0])?;
        self.write_f32(value[1])
    }

    pub fn write_vec3(&mut self, value: Vector3<f32>) -> std::io::Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    pub fn write_point3(&mut self, value: Point3<f32>) -> std::io::Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    /// Writes an encoded name as a `u8` length and its bytes.
    ///
    /// Names longer than [`MAX_NAME_LEN`] are cut, see [`super::encode_name`].
    pub fn write_name(&mut self, name: &[u8]) -> std::io::Result<()> {
        let name = &name[..name.len().min(MAX_NAME_LEN)];
        self.write_u8(name.len() as u8)?;
        self.writer.write_all(name)?;
        self.pos += name.len() as u64;
        Ok(())
    }

    /// Writes a zero `u32` and remembers where it went.
    pub fn reserve_placeholder(&mut self) -> std::io::Result<Placeholder> {
        let offset = self.pos;
        self.write_u32(0)?;
        Ok(Placeholder { offset })
    }

    /// Overwrites a reserved slot, then returns to the append position.
    pub fn patch(&mut self, placeholder: Placeholder, value: u32) -> std::io::Result<()> {
        self.writer.seek(SeekFrom::Start(placeholder.offset))?;
        self.writer.write_u32::<LittleEndian>(value)?;
        self.writer.seek(SeekFrom::Start(self.pos))?;
        Ok(())
    }

    /// Flush the buffer to the underlying stream.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
