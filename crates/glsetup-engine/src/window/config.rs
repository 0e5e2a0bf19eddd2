use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

use crate::paint::ClearColor;

/// Window and render-loop configuration.
///
/// There is no external configuration source; `Default` carries the fixed
/// bootstrap values.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Swap interval 1 (wait for vertical blank) when set.
    pub vsync: bool,
    pub clear_color: ClearColor,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Setup".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            clear_color: ClearColor::BOOTSTRAP,
        }
    }
}

impl WindowConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Zero dimensions are raised to 1; winit rejects empty windows on some platforms.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_clear_color(mut self, color: ClearColor) -> Self {
        self.clear_color = color.clamped();
        self
    }

    pub fn logical_size(&self) -> LogicalSize<f64> {
        LogicalSize::new(self.width as f64, self.height as f64)
    }

    /// Attributes for the single bootstrap window.
    pub fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.logical_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn default_is_800_by_600_with_vsync() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.title, "OpenGL Setup");
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert!(cfg.vsync);
        assert_eq!(cfg.clear_color, ClearColor::new(0.2, 0.3, 0.3, 1.0));
    }

    #[test]
    fn window_attributes_carry_title_and_size() {
        let attrs = WindowConfig::default().window_attributes();
        assert_eq!(attrs.title, "OpenGL Setup");
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(800.0, 600.0)))
        );
    }

    #[test]
    fn with_size_rejects_zero() {
        let cfg = WindowConfig::default().with_size(0, 0);
        assert_eq!((cfg.width, cfg.height), (1, 1));
    }

    #[test]
    fn with_clear_color_clamps() {
        let cfg = WindowConfig::default().with_clear_color(ClearColor::new(2.0, 0.5, -1.0, 1.0));
        assert_eq!(cfg.clear_color, ClearColor::new(1.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn builder_overrides_title_and_vsync() {
        let cfg = WindowConfig::default().with_title("probe").with_vsync(false);
        assert_eq!(cfg.title, "probe");
        assert!(!cfg.vsync);
    }
}
