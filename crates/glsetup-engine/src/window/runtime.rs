use std::time::Duration;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use super::WindowConfig;
use crate::core::{BootstrapError, Lifecycle};
use crate::device::{render_frame, GlDevice};
use crate::time::FrameClock;

/// What a completed run looked like.
#[derive(Debug, Copy, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub average_fps: f64,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the bootstrap to completion.
    ///
    /// Returns once the window is closed or a step failed. The event loop is
    /// consumed by `run_app` and is torn down before this returns, on every path.
    pub fn run(config: WindowConfig) -> Result<RunSummary, BootstrapError> {
        let mut state = AppState::new(config);

        let event_loop = match EventLoop::new().context("failed to create winit EventLoop") {
            Ok(event_loop) => event_loop,
            Err(e) => {
                state.lifecycle.fail(BootstrapError::platform(e));
                return state.finish();
            }
        };

        state.lifecycle.platform_ready();
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Err(e) = event_loop.run_app(&mut state) {
            state.lifecycle.fail(BootstrapError::platform(format!(
                "winit event loop terminated with error: {e}"
            )));
        }

        state.finish()
    }
}

struct AppState {
    config: WindowConfig,
    lifecycle: Lifecycle,
    device: Option<GlDevice>,
    clock: FrameClock,
}

impl AppState {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::new(),
            device: None,
            clock: FrameClock::default(),
        }
    }

    /// Window, vsync, loader. Each fatal step records its failure and stops the loop.
    fn start(&mut self, event_loop: &ActiveEventLoop) {
        let device = match GlDevice::open(event_loop, &self.config) {
            Ok(device) => device,
            Err(e) => {
                self.lifecycle.fail(BootstrapError::window(e));
                event_loop.exit();
                return;
            }
        };

        self.lifecycle.window_opened();
        let size = device.size();
        log::info!(
            "opened window \"{}\" ({}x{} logical, {}x{} physical)",
            self.config.title,
            self.config.width,
            self.config.height,
            size.width,
            size.height
        );

        // A driver that refuses the swap interval still renders.
        if let Err(e) = device.set_vsync(self.config.vsync) {
            log::warn!("vsync unavailable: {e:#}");
        }

        if let Err(e) = device.load_functions() {
            self.lifecycle.fail(BootstrapError::loader(e));
            event_loop.exit();
            return;
        }

        self.lifecycle.loader_ready();
        self.clock.reset();
        device.window().request_redraw();
        self.device = Some(device);
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        // Surface, context and window go before the event loop.
        self.device = None;
        self.lifecycle.closed();
        event_loop.exit();
    }

    fn redraw(&mut self) {
        if !self.lifecycle.can_render() {
            return;
        }
        let Some(device) = self.device.as_mut() else {
            return;
        };

        match render_frame(device, self.config.clear_color) {
            Ok(()) => {
                let ft = self.clock.tick();
                log::trace!("frame {} dt={:.4}s", ft.frame_index, ft.dt);
            }
            // Transient swap failures skip the frame.
            Err(e) => log::warn!("skipping frame: {e:#}"),
        }
    }

    fn finish(self) -> Result<RunSummary, BootstrapError> {
        let AppState {
            lifecycle, clock, ..
        } = self;

        lifecycle.into_outcome()?;

        let summary = RunSummary {
            frames: clock.frames(),
            elapsed: clock.elapsed(),
            average_fps: clock.average_fps(),
        };

        log::info!(
            "presented {} frames in {:.2}s ({:.1} fps)",
            summary.frames,
            summary.elapsed.as_secs_f64(),
            summary.average_fps
        );

        Ok(summary)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Platforms may resume more than once; there is only ever one window.
        if self.device.is_some() || self.lifecycle.window_created() {
            return;
        }

        self.start(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GL objects and the window go before the event loop on every exit path.
        self.device = None;
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.phase().is_terminal() {
            event_loop.exit();
            return;
        }

        // Continuous redraw; the swap interval paces the loop.
        if let Some(device) = &self.device {
            device.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(device) = self.device.as_mut() else {
            return;
        };
        if device.window().id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(new_size) => {
                if self.lifecycle.can_render() {
                    device.resize(new_size);
                    device.window().request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if self.lifecycle.can_render() {
                    let new_size = device.window().inner_size();
                    device.resize(new_size);
                    device.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}
