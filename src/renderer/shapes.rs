//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Angle between the shaft and each stroke of an arrow head
pub const ARROW_HEAD_ANGLE: f32 = PI / 6.0;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// Generate vertices for a straight line of the given width
///
/// A zero-length line yields no vertices.
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::at(a1, color),
        Vertex::at(a2, color),
        Vertex::at(b1, color),
        Vertex::at(b1, color),
        Vertex::at(a2, color),
        Vertex::at(b2, color),
    ]
}

/// End points of the two arrow head strokes, both starting at `to`
///
/// Each stroke points back along the shaft, rotated by ±30°.
pub fn arrow_head(from: Vec2, to: Vec2, head_length: f32) -> [Vec2; 2] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let stroke = |a: f32| to - Vec2::new(a.cos(), a.sin()) * head_length;
    [stroke(angle - ARROW_HEAD_ANGLE), stroke(angle + ARROW_HEAD_ANGLE)]
}

/// Generate vertices for a shaft plus a two-stroke head at `to`
pub fn arrow(from: Vec2, to: Vec2, head_length: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let [left, right] = arrow_head(from, to, head_length);

    let mut vertices = line(from, to, width, color);
    vertices.extend(line(to, left, width, color));
    vertices.extend(line(to, right, width, color));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(10.0, 20.0);
        let vertices = circle(center, 5.0, WHITE, 16);
        assert_eq!(vertices.len(), 48);

        for tri in vertices.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            let rim = tri[1].point();
            assert!(((rim - center).length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_vertex_count() {
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, WHITE, 12).len(), 72);
    }

    #[test]
    fn test_line_width() {
        let vertices = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, WHITE);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [0.0, 1.0]);
        assert_eq!(vertices[1].position, [0.0, -1.0]);
    }

    #[test]
    fn test_zero_length_line_is_empty() {
        let p = Vec2::new(3.0, 3.0);
        assert!(line(p, p, 2.0, WHITE).is_empty());
    }

    #[test]
    fn test_arrow_head_at_thirty_degrees() {
        let from = Vec2::ZERO;
        let to = Vec2::new(100.0, 0.0);
        let [a, b] = arrow_head(from, to, 10.0);

        let back = (from - to).normalize();
        for stroke in [a, b] {
            assert!(((stroke - to).length() - 10.0).abs() < 1e-4);
            let cos = (stroke - to).normalize().dot(back);
            assert!((cos - ARROW_HEAD_ANGLE.cos()).abs() < 1e-5);
        }
        // One stroke on each side of the shaft
        assert!(a.y * b.y < 0.0);
    }

    #[test]
    fn test_arrow_is_three_lines() {
        let vertices = arrow(Vec2::ZERO, Vec2::new(0.0, 50.0), 10.0, 1.5, WHITE);
        assert_eq!(vertices.len(), 18);
    }
}
