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
}

/// Raw bytes for a GPU vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements (straight alpha)
pub mod colors {
    /// Brown dirt, mostly transparent
    pub const GROUND: [f32; 4] = [102.0 / 255.0, 51.0 / 255.0, 0.0, 0.3];
    /// Health bar track
    pub const HEALTH_EMPTY: [f32; 4] = [1.0, 0.0, 0.0, 0.5];
    pub const HEALTH_FULL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}
