//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Hex-style 8-bit channels to a float color
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(0xf7, 0xf6, 0xf2);
    pub const GRID: [f32; 4] = [0.12, 0.44, 0.92, 0.03];
    pub const COLUMN: [f32; 4] = rgb(0x3e, 0xa3, 0x4a);
    pub const COLUMN_CAP: [f32; 4] = rgb(0x38, 0x9d, 0x44);
    pub const GROUND: [f32; 4] = rgb(0xee, 0xf3, 0xf7);
    pub const KITE: [f32; 4] = rgb(0xff, 0x6b, 0x6b);
    pub const KITE_SPAR: [f32; 4] = rgb(0xc9, 0x3c, 0x3c);
    pub const KITE_TAIL: [f32; 4] = rgb(0x1f, 0x6f, 0xeb);
}
