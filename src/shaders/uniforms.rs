//! Uniform schemas and std140-style packing.
//!
//! A shader pair declares its uniforms as a `&'static [UniformSlot]`. The
//! same schema drives both the generated WGSL `Material` struct and the host
//! byte packing, so the two layouts cannot drift apart.

use glam::{Vec2, Vec3, Vec4};

/// Type of a uniform slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    F32,
    Vec2,
    Vec3,
    Vec4,
}

impl UniformKind {
    /// Get the WGSL type name for this kind.
    pub fn wgsl_type(self) -> &'static str {
        match self {
            UniformKind::F32 => "f32",
            UniformKind::Vec2 => "vec2<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Vec4 => "vec4<f32>",
        }
    }

    /// Byte size without trailing padding.
    pub fn byte_size(self) -> usize {
        match self {
            UniformKind::F32 => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 => 12, // 12 bytes, aligned to 16
            UniformKind::Vec4 => 16,
        }
    }

    pub fn align(self) -> usize {
        match self {
            UniformKind::F32 => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 | UniformKind::Vec4 => 16,
        }
    }
}

/// One named entry of a uniform schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformSlot {
    pub name: &'static str,
    pub kind: UniformKind,
}

impl UniformSlot {
    pub const fn new(name: &'static str, kind: UniformKind) -> Self {
        Self { name, kind }
    }
}

/// A value for a uniform slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::F32(_) => UniformKind::F32,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
        }
    }

    /// Write this value to a byte buffer.
    pub fn write_bytes(&self, buf: &mut Vec<u8>) {
        match self {
            UniformValue::F32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            UniformValue::Vec2(v) => buf.extend_from_slice(bytemuck::bytes_of(v)),
            // No padding here; a following scalar packs into the vec3's tail.
            UniformValue::Vec3(v) => buf.extend_from_slice(bytemuck::bytes_of(v)),
            UniformValue::Vec4(v) => buf.extend_from_slice(bytemuck::bytes_of(v)),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::F32(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

/// Byte offset of every slot, in schema order.
pub fn offsets(schema: &[UniformSlot]) -> Vec<usize> {
    let mut cursor: usize = 0;
    schema
        .iter()
        .map(|slot| {
            cursor = cursor.next_multiple_of(slot.kind.align());
            let offset = cursor;
            cursor += slot.kind.byte_size();
            offset
        })
        .collect()
}

/// Buffer size for a schema, rounded up to 16 bytes. Never zero.
pub fn buffer_size(schema: &[UniformSlot]) -> usize {
    let end = schema
        .iter()
        .zip(offsets(schema))
        .map(|(slot, offset)| offset + slot.kind.byte_size())
        .max()
        .unwrap_or(0);
    end.max(16).next_multiple_of(16)
}

/// WGSL struct body for a schema.
pub(crate) fn to_wgsl_fields(schema: &[UniformSlot]) -> String {
    schema
        .iter()
        .map(|slot| format!("    {}: {},", slot.name, slot.kind.wgsl_type()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize values laid out by `schema`. `values` is in schema order.
pub(crate) fn pack(schema: &[UniformSlot], values: &[UniformValue]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(buffer_size(schema));
    for value in values {
        let align = value.kind().align();
        while buf.len() % align != 0 {
            buf.push(0);
        }
        value.write_bytes(&mut buf);
    }
    buf.resize(buffer_size(schema), 0);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &[UniformSlot] = &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("color", UniformKind::Vec3),
        UniformSlot::new("opacity", UniformKind::F32),
        UniformSlot::new("scroll", UniformKind::Vec2),
    ];

    #[test]
    fn test_offsets_follow_alignment() {
        // f32 at 0, vec3 aligned to 16, f32 in the vec3 tail, vec2 aligned to 8.
        assert_eq!(offsets(SCHEMA), vec![0, 16, 28, 32]);
        assert_eq!(buffer_size(SCHEMA), 48);
    }

    #[test]
    fn test_pack_matches_offsets() {
        let values = [
            UniformValue::F32(1.5),
            UniformValue::Vec3(Vec3::new(0.1, 0.2, 0.3)),
            UniformValue::F32(0.6),
            UniformValue::Vec2(Vec2::new(4.0, 5.0)),
        ];
        let bytes = pack(SCHEMA, &values);
        assert_eq!(bytes.len(), 48);

        let read = |offset: usize| f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
        assert_eq!(read(0), 1.5);
        assert_eq!(read(16), 0.1);
        assert_eq!(read(24), 0.3);
        assert_eq!(read(28), 0.6);
        assert_eq!(read(36), 5.0);
    }

    #[test]
    fn test_wgsl_fields() {
        let fields = to_wgsl_fields(&SCHEMA[..2]);
        assert_eq!(fields, "    time: f32,\n    color: vec3<f32>,");
    }

    #[test]
    fn test_empty_schema_still_has_a_buffer() {
        assert_eq!(buffer_size(&[]), 16);
        assert_eq!(pack(&[], &[]).len(), 16);
    }
}
