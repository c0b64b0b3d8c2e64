//! The textured-quad scene: everything one window needs to render frames.

use winit::window::Window;

use crate::device::{GraphicsContext, GraphicsInit, SurfaceErrorAction};
use crate::error::{FrameError, SetupError};
use crate::geometry::GeometryBuffer;
use crate::lifetime::ResourceSlot;
use crate::pipeline::PipelineResources;
use crate::render::{FrameRenderer, GpuFrameSink};
use crate::transform::FrameTransform;

/// Whether the loop should keep running after a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// GPU state owned by the scene.
///
/// Fields drop in declaration order, so per-frame and pipeline objects go
/// before the context that created them.
struct SceneResources<'w> {
    transform: FrameTransform,
    geometry: GeometryBuffer,
    pipeline: PipelineResources,
    gpu: GraphicsContext<'w>,
}

/// Single top-level owner of the scene's GPU resources and frame loop state.
pub struct Scene<'w> {
    resources: ResourceSlot<SceneResources<'w>>,
    renderer: FrameRenderer,
    window: &'w Window,
}

impl<'w> Scene<'w> {
    /// Builds the context, pipeline, vertex buffer and transform for `window`.
    ///
    /// Anything created before a failing step is released on the way out.
    pub async fn new(window: &'w Window, init: GraphicsInit) -> Result<Self, SetupError> {
        let size = window.inner_size();
        let gpu = GraphicsContext::initialize(window, size.width, size.height, init).await?;
        let pipeline = PipelineResources::build(&gpu)?;
        let geometry = GeometryBuffer::build(&gpu);
        let transform =
            FrameTransform::initialize(&gpu, pipeline.transform_layout(), gpu.aspect_ratio());

        log::info!(
            "scene ready: {}x{}, aspect {:.3}",
            size.width,
            size.height,
            gpu.aspect_ratio()
        );

        Ok(Self {
            resources: ResourceSlot::new(
                "scene resources",
                SceneResources {
                    transform,
                    geometry,
                    pipeline,
                    gpu,
                },
            ),
            renderer: FrameRenderer::new(),
            window,
        })
    }

    /// Renders one frame.
    ///
    /// Frame failures are logged and the loop continues; only a fatal surface
    /// error or a released scene ends it.
    pub fn render_frame(&mut self) -> FrameOutcome {
        let Some(resources) = self.resources.get_mut() else {
            log::warn!("render requested after shutdown");
            return FrameOutcome::Exit;
        };

        let SceneResources {
            transform,
            geometry,
            pipeline,
            gpu,
        } = resources;

        let result = {
            let (state, binding) = transform.split();
            let mut sink = GpuFrameSink::new(gpu, pipeline, geometry, binding, self.window);
            self.renderer.render(&mut sink, state)
        };

        match result {
            Ok(()) => FrameOutcome::Continue,
            Err(FrameError::Surface(err)) => {
                let message = err.to_string();
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost for good ({message}); exiting");
                        FrameOutcome::Exit
                    }
                    action => {
                        log::warn!("frame skipped ({message}): {action:?}");
                        FrameOutcome::Continue
                    }
                }
            }
            Err(err) => {
                log::warn!("frame dropped: {err}");
                FrameOutcome::Continue
            }
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.renderer.frames_presented()
    }

    pub fn is_live(&self) -> bool {
        self.resources.is_live()
    }

    /// Releases every GPU resource in reverse creation order.
    ///
    /// Returns `false` if the scene was already shut down.
    pub fn shutdown(&mut self) -> bool {
        let released = self.resources.release();
        if released {
            log::info!(
                "scene shut down after {} frames",
                self.renderer.frames_presented()
            );
        }
        released
    }
}
