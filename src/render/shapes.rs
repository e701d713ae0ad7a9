//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::Rect;

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Convert canvas pixels (origin top-left, y down) to clip space
pub fn to_clip_space(vertices: &mut [Vertex], width: f32, height: f32) {
    for v in vertices {
        v.position = [
            v.position[0] / width * 2.0 - 1.0,
            1.0 - v.position[1] / height * 2.0,
        ];
    }
}
