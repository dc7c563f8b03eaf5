/// Errors raised by mesh, grid and colormap operations
use thiserror::Error;

/// Every failure in the core is an invalid argument reported to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("scale factor must be non-negative, got {0}")]
    NegativeScale(f64),

    #[error("circumradius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("rotation axis has zero length")]
    ZeroAxis,

    #[error("expected a {expected}-dimensional vector, got {found} components")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("meshes must be 2- or 3-dimensional, got {0}")]
    UnsupportedDims(usize),

    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidGridSize { width: usize, height: usize },

    #[error("no vertex with id {0}")]
    UnknownVertex(usize),

    #[error("edge ({0}, {1}) must join two distinct existing vertices")]
    InvalidEdge(usize, usize),

    #[error("no mesh named '{0}'")]
    UnknownMesh(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("invalid colour '{0}'")]
    InvalidColor(String),

    #[error("a colormap needs at least one colour")]
    EmptyPalette,

    #[error("shade must lie in [0, 1], got {0}")]
    ShadeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
