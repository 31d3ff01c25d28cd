//! Drawing for the simulation
//!
//! `RenderSurface` is all the simulation knows about. `MeshSurface` turns the
//! draw calls into a triangle list, and `RenderState` puts that list on a
//! WebGPU canvas.

pub mod pipeline;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
pub use surface::{ArcMode, DrawArc, DrawArrow, MeshSurface, RenderSurface};
pub use vertex::{Vertex, colors};
