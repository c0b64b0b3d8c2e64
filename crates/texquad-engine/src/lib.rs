//! texquad engine crate.
//!
//! Owns the GPU context, the fixed textured-quad pipeline and the per-frame
//! update/draw loop. The demo binary only configures logging and starts the
//! runtime.

pub mod asset;
pub mod device;
pub mod error;
pub mod geometry;
pub mod lifetime;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod transform;
pub mod window;

pub use error::{FrameError, SetupError};
