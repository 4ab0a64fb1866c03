//! Triangle lists for a perspective frame
//!
//! Everything is an axis-aligned quad: the sky and ground halves, then each
//! column's wall strip and optional item strip, in draw order.

use super::projector::{GROUND_COLOR, PerspectiveFrame, SKY_COLOR, Span};
use super::vertex::{Vertex, rgb};

/// Vertices per quad (two triangles)
pub const QUAD_VERTICES: usize = 6;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> [Vertex; QUAD_VERTICES] {
    let (x2, y2) = (x + width, y + height);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

fn span_quad(x: u32, width: u32, span: &Span) -> [Vertex; QUAD_VERTICES] {
    rect(x as f32, span.top, width as f32, span.height, rgb(span.color))
}

/// Tessellate a frame in pixel coordinates
pub fn frame_vertices(frame: &PerspectiveFrame) -> Vec<Vertex> {
    let (w, h) = (frame.viewport.0 as f32, frame.viewport.1 as f32);
    let horizon = frame.horizon as f32;

    let items = frame.columns.iter().filter(|c| c.item.is_some()).count();
    let mut vertices = Vec::with_capacity((2 + frame.columns.len() + items) * QUAD_VERTICES);

    vertices.extend(rect(0.0, 0.0, w, horizon, rgb(SKY_COLOR)));
    vertices.extend(rect(0.0, horizon, w, h - horizon, rgb(GROUND_COLOR)));

    for column in &frame.columns {
        vertices.extend(span_quad(column.x, column.width, &column.wall));
        if let Some((_, span)) = &column.item {
            vertices.extend(span_quad(column.x, column.width, span));
        }
    }

    vertices
}

/// Tessellate a frame straight into normalized device coordinates
pub fn frame_vertices_ndc(frame: &PerspectiveFrame) -> Vec<Vertex> {
    frame_vertices(frame)
        .iter()
        .map(|v| v.to_ndc(frame.viewport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{ColumnStrip, vertex::as_bytes};
    use crate::sim::ItemKind;

    fn span(top: f32, height: f32) -> Span {
        Span {
            top,
            height,
            color: [255, 0, 0],
        }
    }

    fn frame() -> PerspectiveFrame {
        PerspectiveFrame {
            viewport: (200, 100),
            horizon: 50,
            columns: vec![
                ColumnStrip {
                    x: 0,
                    width: 101,
                    wall: span(25.0, 50.0),
                    item: None,
                },
                ColumnStrip {
                    x: 100,
                    width: 101,
                    wall: span(10.0, 80.0),
                    item: Some((ItemKind::Stone, span(40.0, 20.0))),
                },
            ],
        }
    }

    #[test]
    fn test_vertex_counts() {
        let vertices = frame_vertices(&frame());
        // Sky, ground, two walls, one item
        assert_eq!(vertices.len(), 5 * QUAD_VERTICES);
        assert_eq!(as_bytes(&vertices).len(), vertices.len() * 24);
    }

    #[test]
    fn test_draw_order_puts_item_last() {
        let vertices = frame_vertices(&frame());
        let item_quad = &vertices[4 * QUAD_VERTICES..];
        assert_eq!(item_quad[0].position, [100.0, 40.0]);
        assert_eq!(item_quad[5].position, [201.0, 60.0]);
        assert_eq!(vertices[0].color, rgb(SKY_COLOR));
    }

    #[test]
    fn test_ndc_corners() {
        let vertices = frame_vertices_ndc(&frame());
        // Sky quad spans the top half
        assert_eq!(vertices[0].position, [-1.0, 1.0]);
        assert_eq!(vertices[5].position, [1.0, 0.0]);
    }
}
