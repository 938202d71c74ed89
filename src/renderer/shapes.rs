//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{TexVertex, Vertex};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn quad(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x, y) = (pos.x, pos.y);
    let (w, h) = (size.x, size.y);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x + w, y + h, color),
        Vertex::new(x + w, y + h, color),
        Vertex::new(x, y + h, color),
        Vertex::new(x, y, color),
    ]
}

/// Generate textured-quad vertices with the given UV sub-rectangle
pub fn textured_quad(
    pos: Vec2,
    size: Vec2,
    uv_min: Vec2,
    uv_max: Vec2,
    color: [f32; 4],
) -> Vec<TexVertex> {
    let (x, y) = (pos.x, pos.y);
    let (w, h) = (size.x, size.y);
    vec![
        TexVertex::new(x, y, uv_min.x, uv_min.y, color),
        TexVertex::new(x + w, y, uv_max.x, uv_min.y, color),
        TexVertex::new(x + w, y + h, uv_max.x, uv_max.y, color),
        TexVertex::new(x + w, y + h, uv_max.x, uv_max.y, color),
        TexVertex::new(x, y + h, uv_min.x, uv_max.y, color),
        TexVertex::new(x, y, uv_min.x, uv_min.y, color),
    ]
}

/// Textured quad covering the full texture, centered on `center`
pub fn sprite_quad(center: Vec2, size: f32, color: [f32; 4]) -> Vec<TexVertex> {
    textured_quad(
        center - Vec2::splat(size / 2.0),
        Vec2::splat(size),
        Vec2::ZERO,
        Vec2::ONE,
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 32);
        assert_eq!(verts.len(), 32 * 3);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let verts = circle(Vec2::new(5.0, 5.0), 10.0, [1.0; 4], 16);
        // Every third vertex is the center; the rest lie on the circle
        for (i, v) in verts.iter().enumerate() {
            let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
            if i % 3 == 0 {
                assert!(d < 1e-4);
            } else {
                assert!((d - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_quad_is_two_triangles() {
        let verts = quad(Vec2::new(10.0, 10.0), Vec2::new(140.0, 30.0), [0.0; 4]);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[2].position, [150.0, 40.0]);
    }
}
