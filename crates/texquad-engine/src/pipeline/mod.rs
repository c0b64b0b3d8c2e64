//! Fixed rendering pipeline.
//!
//! Shader programs, input layout, texture and sampler are created once at
//! startup and never change.

pub mod layout;
mod resources;
pub mod shader;
mod texture;

pub use layout::Vertex;
pub use resources::{PipelineResources, TEXTURE_GROUP, TRANSFORM_GROUP, TRANSFORM_STAGE};
pub use shader::ShaderStage;
pub use texture::QuadTexture;
