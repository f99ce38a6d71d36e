//! Error types for scene setup and render startup.

use thiserror::Error;

/// Errors that can occur before rendering starts.
///
/// Everything here is a fatal precondition violation; the render loop and
/// estimator themselves never fail (misses and zero pdfs are ordinary
/// control flow).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to seed sampler from system entropy: {0}")]
    Entropy(#[from] rand::Error),

    #[error("light index {index} out of range ({count} spheres in scene)")]
    LightIndexOutOfRange { index: usize, count: usize },

    #[error("sphere {index} is the light but has zero emission")]
    DarkLight { index: usize },

    #[error("sphere {index} has non-zero emission but is not the light")]
    UnexpectedEmitter { index: usize },

    #[error("sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("camera direction and image-plane basis must have non-zero length")]
    DegenerateCamera,
}

pub type RenderResult<T> = Result<T, RenderError>;
