use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::SetupError;
use crate::lifetime::ResourceSlot;

use super::surface;
use super::{GpuFrame, GraphicsInit, RenderTargets, SurfaceErrorAction};

/// Owns wgpu core objects, the surface and the off-screen render targets.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - owns the multisampled colour target and the depth buffer
/// - acquires frames and presents them
///
/// Fields are declared in release order: render targets first, the device and
/// instance last.
pub struct GraphicsContext<'w> {
    /// Colour + depth attachments. Released by [`GraphicsContext::shutdown`].
    targets: ResourceSlot<RenderTargets>,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive the
    /// context.
    surface: wgpu::Surface<'w>,

    /// Active surface configuration. Never changes after creation.
    config: wgpu::SurfaceConfiguration,

    /// Command queue (the immediate submission path).
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// wgpu instance used to create the adapter and surface.
    instance: wgpu::Instance,

    /// Effective multisample count of the colour and depth targets.
    sample_count: u32,

    /// Drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> GraphicsContext<'w> {
    /// Creates a graphics context presenting to `window` at `width` x `height`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn initialize(
        window: &'w Window,
        width: u32,
        height: u32,
        init: GraphicsInit,
    ) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::ResourceCreation(format!(
                "window has zero size ({width}x{height})"
            )));
        }

        let GraphicsInit {
            preferred_formats,
            present_mode,
            alpha_mode,
            sample_count,
            depth_format,
            power_preference,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance
            .create_surface(window)
            .map_err(|e| SetupError::DeviceCreation(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SetupError::DeviceCreation(format!("no suitable adapter: {e}")))?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.device_type, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("texquad device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| SetupError::DeviceCreation(format!("failed to create device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps.formats, &preferred_formats)
            .ok_or_else(|| SetupError::DeviceCreation("surface reports no formats".to_string()))?;
        let alpha_mode = surface::choose_alpha_mode(&surface_caps.alpha_modes, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let sample_count = surface::choose_sample_count(format, device.features(), sample_count);
        let targets = RenderTargets::create(&device, &config, sample_count, depth_format)?;

        log::info!(
            "swapchain {width}x{height} {format:?}, {present_mode:?}, {sample_count}x MSAA"
        );

        Ok(Self {
            targets: ResourceSlot::new("render targets", targets),
            surface,
            config,
            queue,
            device,
            adapter,
            instance,
            sample_count,
            size: PhysicalSize::new(width, height),
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Width over height of the drawable.
    pub fn aspect_ratio(&self) -> f32 {
        self.size.width as f32 / self.size.height as f32
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    /// Returns the render targets, or `None` after [`shutdown`](Self::shutdown).
    pub fn targets(&self) -> Option<&RenderTargets> {
        self.targets.get()
    }

    pub fn is_live(&self) -> bool {
        self.targets.is_live()
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("texquad frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    ///
    /// With FIFO presentation this blocks until the next vertical sync once
    /// the swapchain is full.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, err)
    }

    /// Releases the render targets ahead of the device.
    ///
    /// Safe to call more than once; returns `false` when there was nothing left
    /// to release. The surface, queue and device are released when the context
    /// is dropped.
    pub fn shutdown(&mut self) -> bool {
        let released = self.targets.release();
        if released {
            log::info!("graphics context shut down");
        }
        released
    }
}

impl Drop for GraphicsContext<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
