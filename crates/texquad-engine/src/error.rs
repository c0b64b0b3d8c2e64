//! Error taxonomy.
//!
//! Setup errors are unrecoverable: they propagate to `main` and terminate the
//! process. Frame errors are reported by the render loop and the next frame is
//! attempted.

use crate::render::FramePhase;

/// Failure while building the GPU context or the fixed pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No adapter, device or presentation surface could be created.
    #[error("no compatible GPU device: {0}")]
    DeviceCreation(String),

    /// A shader unit failed to parse or validate, lacks its entry point, or
    /// declares inputs that do not match the vertex layout.
    #[error("shader unit `{unit}` failed to compile: {message}")]
    ShaderCompile { unit: &'static str, message: String },

    /// A buffer, texture or view could not be created as described.
    #[error("resource creation failed: {0}")]
    ResourceCreation(String),
}

/// Failure while recording or presenting a single frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame step out of order: expected {expected:?}, found {found:?}")]
    OutOfOrder {
        expected: FramePhase,
        found: FramePhase,
    },

    #[error("no render pass is open")]
    NoActivePass,

    #[error("frame was already presented or never acquired")]
    NoFrame,

    #[error("graphics context has been shut down")]
    Released,

    #[error("surface acquisition failed: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
