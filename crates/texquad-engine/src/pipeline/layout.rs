//! Vertex format and input layout.
//!
//! The layout is a fixed table; the vertex program's declared inputs are
//! checked against it at setup.

use bytemuck::{Pod, Zeroable};

use crate::error::SetupError;

/// One packed vertex: position, color, texcoord. 32 bytes, no padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// Per-vertex stride in bytes.
    pub const STRIDE: wgpu::BufferAddress = std::mem::size_of::<Vertex>() as wgpu::BufferAddress;

    /// POSITION @ 0, COLOR @ 12, TEXCOORD @ 24.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // color
        2 => Float32x2  // texcoord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One input declared by a vertex entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InputSlot {
    pub location: u32,
    pub format: wgpu::VertexFormat,
}

/// Checks a declared input signature against [`Vertex::ATTRIBUTES`].
///
/// `signature` must be sorted by location. Every attribute must be consumed
/// with exactly its format and no extra inputs may be declared.
pub fn validate_signature(unit: &'static str, signature: &[InputSlot]) -> Result<(), SetupError> {
    let mismatch = |message: String| SetupError::ShaderCompile { unit, message };

    if signature.len() != Vertex::ATTRIBUTES.len() {
        return Err(mismatch(format!(
            "vertex entry declares {} inputs, layout provides {}",
            signature.len(),
            Vertex::ATTRIBUTES.len()
        )));
    }

    for (slot, attr) in signature.iter().zip(Vertex::ATTRIBUTES.iter()) {
        if slot.location != attr.shader_location || slot.format != attr.format {
            return Err(mismatch(format!(
                "input @location({}) {:?} does not match layout @location({}) {:?}",
                slot.location, slot.format, attr.shader_location, attr.format
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_signature() -> Vec<InputSlot> {
        vec![
            InputSlot { location: 0, format: wgpu::VertexFormat::Float32x3 },
            InputSlot { location: 1, format: wgpu::VertexFormat::Float32x3 },
            InputSlot { location: 2, format: wgpu::VertexFormat::Float32x2 },
        ]
    }

    // ── layout table ──────────────────────────────────────────────────────

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(Vertex::STRIDE, 32);
        assert_eq!(Vertex::layout().array_stride, 32);
        assert_eq!(Vertex::layout().step_mode, wgpu::VertexStepMode::Vertex);
    }

    #[test]
    fn attribute_offsets() {
        let offsets: Vec<u64> = Vertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }

    #[test]
    fn attribute_formats_and_locations() {
        let attrs: Vec<(u32, wgpu::VertexFormat)> = Vertex::ATTRIBUTES
            .iter()
            .map(|a| (a.shader_location, a.format))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (0, wgpu::VertexFormat::Float32x3),
                (1, wgpu::VertexFormat::Float32x3),
                (2, wgpu::VertexFormat::Float32x2),
            ]
        );
    }

    // ── signature validation ──────────────────────────────────────────────

    #[test]
    fn matching_signature_is_accepted() {
        assert!(validate_signature("vertex.wgsl", &expected_signature()).is_ok());
    }

    #[test]
    fn missing_input_is_rejected() {
        let mut sig = expected_signature();
        sig.pop();
        assert!(validate_signature("vertex.wgsl", &sig).is_err());
    }

    #[test]
    fn wrong_format_is_rejected() {
        let mut sig = expected_signature();
        sig[2].format = wgpu::VertexFormat::Float32x3;
        let err = validate_signature("vertex.wgsl", &sig).unwrap_err();
        assert!(matches!(err, SetupError::ShaderCompile { unit: "vertex.wgsl", .. }));
    }

    #[test]
    fn shifted_location_is_rejected() {
        let mut sig = expected_signature();
        sig[1].location = 3;
        assert!(validate_signature("vertex.wgsl", &sig).is_err());
    }
}
