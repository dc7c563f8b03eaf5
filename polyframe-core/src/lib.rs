/// Polyframe Core Library - wireframe polyhedra on a shade raster
///
/// This library builds polyhedral meshes, moves them with rigid transforms,
/// projects them onto a 2D canvas and rasterizes their edges into a field of
/// shades that a colormap turns into colour.

pub mod canvas;
pub mod colormap;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod parse;
pub mod polyhedra;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use canvas::{PaintMode, ShadeField};
pub use colormap::{Colormap, Rgb};
pub use error::{Error, Result};
pub use geometry::{Edge, Mesh, Pivot};
pub use grid::{Grid, Origin};
pub use polyhedra::Solid;
pub use projection::{ProjectionMode, Projector};
pub use transform::Transform;
