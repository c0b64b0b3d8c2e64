//! Per-frame rendering.
//!
//! [`FrameRenderer`] drives the fixed clear / bind / upload / draw / present
//! sequence through a [`FrameSink`]. [`GpuFrameSink`] executes it with wgpu;
//! tests substitute a recording sink.

mod draw;
mod gpu_sink;
mod phase;
mod renderer;

pub use draw::{CLEAR_COLOR, CLEAR_DEPTH, DrawCall, FrameSink, QUAD_DRAW};
pub use gpu_sink::GpuFrameSink;
pub use phase::FramePhase;
pub use renderer::FrameRenderer;
