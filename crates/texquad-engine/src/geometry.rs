//! Static quad geometry.

use wgpu::util::DeviceExt;

use crate::device::GraphicsContext;
use crate::pipeline::Vertex;

/// The quad, ordered for triangle-strip drawing: top-left, top-right,
/// bottom-left, bottom-right.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [-0.8, 0.8, 0.0],
        color: [0.0, 0.0, 0.0],
        texcoord: [0.0, 0.0],
    },
    Vertex {
        position: [0.8, 0.8, 0.0],
        color: [1.0, 0.0, 0.0],
        texcoord: [1.0, 0.0],
    },
    Vertex {
        position: [-0.8, -0.8, 0.0],
        color: [0.0, 1.0, 0.0],
        texcoord: [0.0, 1.0],
    },
    Vertex {
        position: [0.8, -0.8, 0.0],
        color: [1.0, 1.0, 0.0],
        texcoord: [1.0, 1.0],
    },
];

/// Immutable GPU vertex buffer holding [`QUAD_VERTICES`].
///
/// Created with `VERTEX` usage only, so it cannot be written after upload.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    pub fn build(gpu: &GraphicsContext<'_>) -> Self {
        let buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("texquad quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        log::debug!("uploaded {} quad vertices", QUAD_VERTICES.len());

        Self {
            buffer,
            vertex_count: QUAD_VERTICES.len() as u32,
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_has_four_vertices_of_32_bytes() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(bytes.len(), 4 * 32);
    }

    #[test]
    fn positions_are_strip_ordered() {
        let positions: Vec<[f32; 3]> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [-0.8, 0.8, 0.0],
                [0.8, 0.8, 0.0],
                [-0.8, -0.8, 0.0],
                [0.8, -0.8, 0.0],
            ]
        );
    }

    #[test]
    fn colors_and_texcoords() {
        let colors: Vec<[f32; 3]> = QUAD_VERTICES.iter().map(|v| v.color).collect();
        let uvs: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.texcoord).collect();
        assert_eq!(
            colors,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]
        );
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn raw_bytes_follow_the_layout_offsets() {
        let floats: &[f32] = bytemuck::cast_slice(&QUAD_VERTICES);
        // v1: position at +0, color at +12, texcoord at +24 (in floats: 8, 11, 14).
        assert_eq!(&floats[8..11], &[0.8, 0.8, 0.0]);
        assert_eq!(&floats[11..14], &[1.0, 0.0, 0.0]);
        assert_eq!(&floats[14..16], &[1.0, 0.0]);
    }
}
