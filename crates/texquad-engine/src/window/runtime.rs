use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::GraphicsInit;
use crate::scene::{FrameOutcome, Scene};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "texquad".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed.
    ///
    /// A setup failure closes the event loop and is returned here.
    pub fn run(config: RuntimeConfig, graphics_init: GraphicsInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, graphics_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.setup_error.take() {
            Some(err) => Err(err),
            None => {
                log::info!("exited cleanly");
                Ok(())
            }
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    scene: Scene<'this>,
}

struct AppState {
    config: RuntimeConfig,
    graphics_init: GraphicsInit,

    entry: Option<WindowEntry>,
    setup_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, graphics_init: GraphicsInit) -> Self {
        Self {
            config,
            graphics_init,
            entry: None,
            setup_error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let graphics_init = self.graphics_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            scene_builder: |w| pollster::block_on(Scene::new(w, graphics_init)),
        }
        .try_build()
        .context("scene setup failed")?;

        self.entry = Some(entry);
        Ok(())
    }

    /// Releases the scene, then the window.
    fn destroy_window_entry(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            entry.with_scene_mut(|scene| scene.shutdown());
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("{e:#}");
            self.setup_error = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; FIFO presentation paces the loop.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.destroy_window_entry();
                self.request_exit(event_loop);
            }

            WindowEvent::RedrawRequested => {
                let outcome = entry.with_scene_mut(|scene| scene.render_frame());
                if outcome == FrameOutcome::Exit {
                    self.destroy_window_entry();
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.destroy_window_entry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_640_by_480() {
        let config = RuntimeConfig::default();
        assert_eq!(config.title, "texquad");
        assert_eq!(config.initial_size, LogicalSize::new(640.0, 480.0));
    }
}
