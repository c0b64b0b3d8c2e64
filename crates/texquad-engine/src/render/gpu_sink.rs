use winit::window::Window;

use crate::device::{GpuFrame, GraphicsContext};
use crate::error::FrameError;
use crate::geometry::GeometryBuffer;
use crate::pipeline::{
    PipelineResources, ShaderStage, TEXTURE_GROUP, TRANSFORM_GROUP, TRANSFORM_STAGE,
};
use crate::transform::{TransformBinding, TransformUniform};

use super::draw::{DrawCall, FrameSink};

/// Executes the frame protocol against the GPU.
///
/// `clear` acquires the surface texture and opens the render pass; `present`
/// closes the pass, submits and presents. Dropping the sink mid-frame ends the
/// pass and discards the frame.
pub struct GpuFrameSink<'a, 'w> {
    // Declared before `frame`: the pass records into the frame's encoder and
    // must end first.
    pass: Option<wgpu::RenderPass<'static>>,
    frame: Option<GpuFrame>,

    gpu: &'a GraphicsContext<'w>,
    pipeline: &'a PipelineResources,
    geometry: &'a GeometryBuffer,
    transform: &'a TransformBinding,
    window: &'a Window,
}

impl<'a, 'w> GpuFrameSink<'a, 'w> {
    pub fn new(
        gpu: &'a GraphicsContext<'w>,
        pipeline: &'a PipelineResources,
        geometry: &'a GeometryBuffer,
        transform: &'a TransformBinding,
        window: &'a Window,
    ) -> Self {
        Self {
            pass: None,
            frame: None,
            gpu,
            pipeline,
            geometry,
            transform,
            window,
        }
    }

    fn pass(&mut self) -> Result<&mut wgpu::RenderPass<'static>, FrameError> {
        self.pass.as_mut().ok_or(FrameError::NoActivePass)
    }
}

impl FrameSink for GpuFrameSink<'_, '_> {
    fn clear(&mut self, color: wgpu::Color, depth: f32) -> Result<(), FrameError> {
        // Discard anything left from an abandoned frame.
        self.pass = None;
        self.frame = None;

        let targets = self.gpu.targets().ok_or(FrameError::Released)?;
        let mut frame = self.gpu.begin_frame()?;

        // With multisampling the MSAA target is drawn into and resolved into
        // the surface texture; the MSAA contents need not be stored.
        let color_attachment = match targets.msaa_view() {
            Some(msaa) => wgpu::RenderPassColorAttachment {
                view: msaa,
                resolve_target: Some(&frame.view),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Discard,
                },
                depth_slice: None,
            },
            None => wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            },
        };

        let pass = frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("texquad frame pass"),
                color_attachments: &[Some(color_attachment)],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: targets.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            })
            .forget_lifetime();

        self.pass = Some(pass);
        self.frame = Some(frame);
        Ok(())
    }

    fn bind_pipeline(&mut self) -> Result<(), FrameError> {
        let pipeline = self.pipeline;
        let geometry = self.geometry;
        let pass = self.pass()?;

        pass.set_pipeline(pipeline.render_pipeline());
        pass.set_vertex_buffer(0, geometry.buffer().slice(..));
        pass.set_bind_group(TEXTURE_GROUP, pipeline.texture_bind_group(), &[]);
        Ok(())
    }

    fn upload_transform(&mut self, uniform: &TransformUniform) -> Result<(), FrameError> {
        if self.pass.is_none() {
            return Err(FrameError::NoActivePass);
        }
        // Queue writes land before the frame's command buffer executes.
        self.transform.upload(self.gpu.queue(), uniform);
        Ok(())
    }

    fn bind_transform(&mut self, stage: ShaderStage) -> Result<(), FrameError> {
        if stage != TRANSFORM_STAGE {
            log::warn!("transform requested at {stage:?}; pipeline binds it at {TRANSFORM_STAGE:?}");
        }
        let transform = self.transform;
        let pass = self.pass()?;
        pass.set_bind_group(TRANSFORM_GROUP, transform.bind_group(), &[]);
        Ok(())
    }

    fn draw(&mut self, call: DrawCall) -> Result<(), FrameError> {
        let topology = self.pipeline.topology();
        if call.topology != topology {
            log::warn!(
                "draw requested {:?} but the pipeline is built for {topology:?}",
                call.topology
            );
        }
        let pass = self.pass()?;
        pass.draw(call.vertices(), 0..1);
        Ok(())
    }

    fn present(&mut self) -> Result<(), FrameError> {
        // End the pass before finishing the encoder.
        let pass = self.pass.take().ok_or(FrameError::NoActivePass)?;
        drop(pass);

        let frame = self.frame.take().ok_or(FrameError::NoFrame)?;
        self.window.pre_present_notify();
        self.gpu.present(frame);
        Ok(())
    }
}
