//! GPU device + presentation surface.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - owning the multisampled colour target and the depth buffer
//! - acquiring and presenting frames

mod context;
mod error;
mod frame;
mod init;
mod surface;
mod targets;

pub use context::GraphicsContext;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GraphicsInit;
pub use targets::{RenderTargets, TargetSpec};
