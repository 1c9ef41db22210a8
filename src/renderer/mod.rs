//! Presentation adapter
//!
//! Turns solved body state into draw primitives, and primitives into
//! triangle-list vertices for a GPU renderer. Holds no state.

pub mod primitives;
pub mod shapes;
pub mod vertex;

pub use primitives::{RenderPrimitive, render_primitives};
pub use shapes::{ellipse_points, tessellate};
pub use vertex::Vertex;
