use std::ffi::{CStr, CString};
use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentContext, NotCurrentGlContext,
    PossiblyCurrentContext,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::FrameTarget;
use crate::paint::ClearColor;
use crate::window::WindowConfig;

/// GL entry points the render loop calls.
///
/// All must resolve for the loader to count as initialized.
const REQUIRED_SYMBOLS: [&str; 4] = ["glClearColor", "glClear", "glViewport", "glGetString"];

/// The single window together with its current GL context and surface.
///
/// Field order is drop order: the surface and context go before the window
/// they render into.
pub struct GlDevice {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    size: PhysicalSize<u32>,
}

impl GlDevice {
    /// Creates the window, a GL context and a window surface, and makes the
    /// context current on this thread.
    pub fn open(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self> {
        let raw_display = event_loop
            .display_handle()
            .context("event loop has no display handle")?
            .as_raw();

        // SAFETY: the display handle comes from the live event loop, which
        // outlives every GL object created here.
        let display = unsafe { Display::new(raw_display, display_preference()) }
            .context("failed to connect to GL display")?;

        let template = ConfigTemplateBuilder::new().build();
        let configs = unsafe { display.find_configs(template) }
            .context("failed to query GL configs")?;
        let gl_config = pick_config(configs).context("no matching GL config")?;

        // Matches the window's visual to the config where the platform needs it (X11).
        let window =
            glutin_winit::finalize_window(event_loop, config.window_attributes(), &gl_config)
                .map_err(|e| anyhow!("failed to create window: {e}"))?;

        log::debug!(
            "picked GL config: samples={} srgb={} hw={}",
            gl_config.num_samples(),
            gl_config.srgb_capable(),
            gl_config.hardware_accelerated()
        );

        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());
        let not_current = create_context(&display, &gl_config, raw_handle)?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to build GL surface attributes")?;

        // SAFETY: `surface_attrs` carries the handle of `window`, which outlives
        // the surface (see field order).
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create GL window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let size = window.inner_size();

        Ok(Self {
            surface,
            context,
            window,
            size,
        })
    }

    /// Sets the swap interval: wait for one vertical blank, or don't wait.
    pub fn set_vsync(&self, enabled: bool) -> Result<()> {
        let interval = if enabled {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };

        self.surface
            .set_swap_interval(&self.context, interval)
            .context("failed to set swap interval")
    }

    /// Resolves GL entry points through the current context's display.
    ///
    /// Must run with this device's context current. Fails if any symbol the
    /// render loop needs is still unresolved afterwards.
    pub fn load_functions(&self) -> Result<()> {
        let display = self.context.display();

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(name) => display.get_proc_address(name.as_c_str()),
            Err(_) => std::ptr::null(),
        });

        let resolved = [
            gl::ClearColor::is_loaded(),
            gl::Clear::is_loaded(),
            gl::Viewport::is_loaded(),
            gl::GetString::is_loaded(),
        ];

        let missing: Vec<&str> = REQUIRED_SYMBOLS
            .iter()
            .zip(resolved)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect();

        anyhow::ensure!(missing.is_empty(), "unresolved GL symbols: {}", missing.join(", "));

        if let Some(version) = gl_string(gl::VERSION) {
            log::info!("OpenGL {version}");
        }
        if let Some(renderer) = gl_string(gl::RENDERER) {
            log::debug!("GL renderer: {renderer}");
        }

        self.apply_viewport();
        Ok(())
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and the GL viewport. Zero sizes (minimized) are ignored.
    ///
    /// GL functions must already be loaded.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (
            NonZeroU32::new(new_size.width),
            NonZeroU32::new(new_size.height),
        ) else {
            return;
        };

        self.surface.resize(&self.context, w, h);
        self.size = new_size;
        self.apply_viewport();
    }

    fn apply_viewport(&self) {
        let width = i32::try_from(self.size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.size.height).unwrap_or(i32::MAX);
        // SAFETY: context is current and `glViewport` was verified by `load_functions`.
        unsafe { gl::Viewport(0, 0, width, height) };
    }
}

impl FrameTarget for GlDevice {
    fn clear(&mut self, color: ClearColor) {
        let [r, g, b, a] = color.to_array();
        // SAFETY: only called while running, after `load_functions` succeeded.
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Prefers hardware-accelerated configs, otherwise keeps the platform's first choice.
///
/// `None` when the display offers no config at all; glutin may report an
/// empty set as success.
fn pick_config(configs: impl Iterator<Item = Config>) -> Option<Config> {
    configs.reduce(|best, candidate| {
        if !best.hardware_accelerated() && candidate.hardware_accelerated() {
            candidate
        } else {
            best
        }
    })
}

#[cfg(target_os = "macos")]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(target_os = "windows")]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(None)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

/// Desktop GL first, then GLES for platforms without a desktop driver.
fn create_context(
    display: &Display,
    config: &Config,
    raw_handle: Option<RawWindowHandle>,
) -> Result<NotCurrentContext> {
    let desktop = ContextAttributesBuilder::new().build(raw_handle);
    let gles = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(None))
        .build(raw_handle);

    // SAFETY: `raw_handle` belongs to a live window owned by the caller.
    match unsafe { display.create_context(config, &desktop) } {
        Ok(ctx) => Ok(ctx),
        Err(desktop_err) => {
            log::warn!("desktop GL context unavailable ({desktop_err}), trying GLES");
            unsafe { display.create_context(config, &gles) }
                .context("failed to create GL context")
        }
    }
}

fn gl_string(name: gl::types::GLenum) -> Option<String> {
    // SAFETY: `glGetString` is loaded; a non-null result is a static NUL-terminated string.
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return None;
    }

    let s = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_symbols_cover_the_render_loop() {
        assert_eq!(
            REQUIRED_SYMBOLS,
            ["glClearColor", "glClear", "glViewport", "glGetString"]
        );
    }

    #[test]
    fn empty_config_set_yields_none() {
        assert!(pick_config(std::iter::empty()).is_none());
    }

    #[test]
    fn empty_config_set_becomes_window_creation_error() {
        use crate::core::BootstrapError;

        let err = pick_config(std::iter::empty())
            .context("no matching GL config")
            .map_err(BootstrapError::window)
            .unwrap_err();

        assert_eq!(err.message(), "Failed to open window!");
        assert_eq!(err.detail(), "no matching GL config");
        assert_eq!(err.exit_code(), -1);
    }
}
