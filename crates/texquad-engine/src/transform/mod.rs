//! Per-frame transform state.
//!
//! CPU-side matrices and rotation live in [`TransformState`]; the GPU uniform
//! buffer they are uploaded into lives in [`FrameTransform`].

mod frame_transform;
mod state;

pub use frame_transform::{FrameTransform, TransformBinding};
pub use state::{
    EYE, FAR_PLANE, FOV_Y, NEAR_PLANE, ROTATION_STEP, TransformState, TransformUniform,
};
