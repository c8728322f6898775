//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in playfield coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{Dash, Rect};

/// Segments used to tessellate the ball
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

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

/// Generate vertices for a straight line of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a dashed line. Dashes start at `from`; the last
/// dash is cut off at `to`.
pub fn dashed_line(from: Vec2, to: Vec2, dash: Dash, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let length = from.distance(to);
    let period = dash.on + dash.off;
    if length <= 0.0 || dash.on <= 0.0 || period <= 0.0 {
        return Vec::new();
    }
    let dir = (to - from) / length;

    let dashes = (length / period).ceil() as usize;
    let mut vertices = Vec::with_capacity(dashes * 6);

    let mut start = 0.0;
    while start < length {
        let end = (start + dash.on).min(length);
        vertices.extend(line(from + dir * start, from + dir * end, width, color));
        start += period;
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_corners() {
        let vertices = rect(Rect::new(20.0, 250.0, 15.0, 100.0), WHITE);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            assert!(v.position[0] == 20.0 || v.position[0] == 35.0);
            assert!(v.position[1] == 250.0 || v.position[1] == 350.0);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(400.0, 300.0);
        let vertices = circle(center, 10.0, WHITE, CIRCLE_SEGMENTS);
        assert_eq!(vertices.len(), (CIRCLE_SEGMENTS * 3) as usize);
        for v in &vertices {
            let p = Vec2::new(v.position[0], v.position[1]);
            assert!(p.distance(center) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_center_divider_dash_count() {
        // 600 px with a 20 px period: 30 dashes
        let vertices = dashed_line(
            Vec2::new(400.0, 0.0),
            Vec2::new(400.0, 600.0),
            Dash { on: 5.0, off: 15.0 },
            2.0,
            WHITE,
        );
        assert_eq!(vertices.len(), 30 * 6);
        for v in &vertices {
            assert!((v.position[0] - 400.0).abs() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_last_dash_is_clipped() {
        let vertices = dashed_line(
            Vec2::ZERO,
            Vec2::new(0.0, 22.0),
            Dash { on: 5.0, off: 15.0 },
            2.0,
            WHITE,
        );
        assert_eq!(vertices.len(), 12);
        let max_y = vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((max_y - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_lines_are_empty() {
        let dash = Dash { on: 5.0, off: 15.0 };
        let no_ink = Dash { on: 0.0, off: 15.0 };
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, WHITE).is_empty());
        assert!(dashed_line(Vec2::ONE, Vec2::ONE, dash, 2.0, WHITE).is_empty());
        assert!(dashed_line(Vec2::ZERO, Vec2::X, no_ink, 2.0, WHITE).is_empty());
    }
}
