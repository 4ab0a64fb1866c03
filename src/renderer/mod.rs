//! First-person rendering
//!
//! Projects ray fans into screen columns and tessellates them into vertex
//! lists. Drawing the vertices is left to the host window.

pub mod projector;
pub mod shapes;
pub mod vertex;

pub use projector::{ColumnStrip, PerspectiveFrame, Span, project};
pub use shapes::{frame_vertices, frame_vertices_ndc};
pub use vertex::{Vertex, as_bytes};
