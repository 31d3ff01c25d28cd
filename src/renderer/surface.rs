//! Draw surface abstraction and the mesh-building implementation

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};

/// Segments used to tessellate a full circle
pub const CIRCLE_SEGMENTS: u32 = 24;
/// Width of stroked outlines and arrow lines (pixels)
pub const STROKE_WIDTH: f32 = 1.5;

/// Whether an arc is filled or outlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcMode {
    #[default]
    Fill,
    Stroke,
}

/// A full circle to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawArc {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    pub mode: ArcMode,
}

/// A line from `from` to `to` with a two-stroke head at `to`
#[derive(Debug, Clone, PartialEq)]
pub struct DrawArrow {
    pub from: Vec2,
    pub to: Vec2,
    pub head_length: f32,
}

/// Anything the simulation can draw onto
pub trait RenderSurface {
    /// Wipe the previous frame
    fn clear(&mut self);
    fn draw_arc(&mut self, arc: &DrawArc);
    fn draw_arrow(&mut self, arrow: &DrawArrow);
}

/// Collects draw calls as a triangle list in surface coordinates
#[derive(Debug, Default)]
pub struct MeshSurface {
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl RenderSurface for MeshSurface {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn draw_arc(&mut self, arc: &DrawArc) {
        let vertices = match arc.mode {
            ArcMode::Fill => shapes::circle(arc.center, arc.radius, arc.color, CIRCLE_SEGMENTS),
            ArcMode::Stroke => shapes::ring(
                arc.center,
                (arc.radius - STROKE_WIDTH / 2.0).max(0.0),
                arc.radius + STROKE_WIDTH / 2.0,
                arc.color,
                CIRCLE_SEGMENTS,
            ),
        };
        self.vertices.extend(vertices);
    }

    fn draw_arrow(&mut self, arrow: &DrawArrow) {
        self.vertices.extend(shapes::arrow(
            arrow.from,
            arrow.to,
            arrow.head_length,
            STROKE_WIDTH,
            colors::ACCELERATION,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(mode: ArcMode) -> DrawArc {
        DrawArc {
            center: Vec2::new(50.0, 50.0),
            radius: 10.0,
            color: colors::PARTICLE,
            mode,
        }
    }

    #[test]
    fn test_fill_and_stroke() {
        let mut surface = MeshSurface::new();
        surface.draw_arc(&arc(ArcMode::Fill));
        assert_eq!(surface.vertices().len(), (CIRCLE_SEGMENTS * 3) as usize);

        surface.clear();
        surface.draw_arc(&arc(ArcMode::Stroke));
        assert_eq!(surface.vertices().len(), (CIRCLE_SEGMENTS * 6) as usize);
    }

    #[test]
    fn test_arrow_and_clear() {
        let mut surface = MeshSurface::with_capacity(64);
        surface.draw_arrow(&DrawArrow {
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(30.0, 40.0),
            head_length: 10.0,
        });
        assert_eq!(surface.vertices().len() % 3, 0);
        assert!(!surface.vertices().is_empty());
        assert!(surface.vertices().iter().all(|v| v.color == colors::ACCELERATION));

        surface.clear();
        assert!(surface.vertices().is_empty());
    }

    #[test]
    fn test_degenerate_arrow_draws_only_head() {
        // Zero acceleration: no shaft, and atan2(0, 0) = 0 still gives a head
        let mut surface = MeshSurface::new();
        let p = Vec2::new(5.0, 5.0);
        surface.draw_arrow(&DrawArrow {
            from: p,
            to: p,
            head_length: 10.0,
        });
        assert_eq!(surface.vertices().len(), 12);
    }
}
