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

/// Colors for scene elements
pub mod colors {
    pub const WATER: [f32; 4] = [0.1, 0.35, 0.55, 1.0];
    pub const BANK: [f32; 4] = [0.25, 0.5, 0.2, 1.0];
    pub const RIPPLE: [f32; 4] = [0.6, 0.8, 0.95, 0.25];
    pub const OTTER: [f32; 4] = [0.45, 0.3, 0.18, 1.0];
    pub const OTTER_BELLY: [f32; 4] = [0.8, 0.65, 0.45, 1.0];
    pub const OTTER_HIT: [f32; 4] = [1.0, 0.3, 0.3, 1.0];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const BACKGROUND: [f32; 4] = [0.05, 0.12, 0.08, 1.0];

    /// Opaque RGBA from a table RGB
    pub const fn rgb(c: [f32; 3]) -> [f32; 4] {
        [c[0], c[1], c[2], 1.0]
    }
}
