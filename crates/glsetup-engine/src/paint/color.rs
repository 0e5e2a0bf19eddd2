/// Straight-alpha RGBA color used to clear the framebuffer.
///
/// Channels are expected in `[0, 1]`. GL clamps clear values for fixed-point
/// framebuffers anyway, but [`clamped`](Self::clamped) keeps user-provided
/// values well-formed before they reach the driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    /// Dark teal the bootstrap window is cleared to every frame.
    pub const BOOTSTRAP: Self = Self::new(0.2, 0.3, 0.3, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps every channel to `[0, 1]`. Non-finite channels become `0`.
    #[inline]
    pub fn clamped(self) -> Self {
        fn channel(v: f32) -> f32 {
            if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
        }

        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: channel(self.a),
        }
    }

    /// Returns the channels in `glClearColor` argument order.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BOOTSTRAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_color_matches_fixed_value() {
        assert_eq!(ClearColor::BOOTSTRAP.to_array(), [0.2, 0.3, 0.3, 1.0]);
        assert_eq!(ClearColor::default(), ClearColor::BOOTSTRAP);
    }

    #[test]
    fn clamped_leaves_valid_color_untouched() {
        assert_eq!(ClearColor::BOOTSTRAP.clamped(), ClearColor::BOOTSTRAP);
    }

    #[test]
    fn clamped_pulls_channels_into_range() {
        let c = ClearColor::new(-0.5, 1.5, 0.25, 2.0).clamped();
        assert_eq!(c.to_array(), [0.0, 1.0, 0.25, 1.0]);
    }

    #[test]
    fn clamped_zeroes_non_finite_channels() {
        let c = ClearColor::new(f32::NAN, f32::INFINITY, 0.5, 1.0);
        assert!(!c.is_finite());

        let c = c.clamped();
        assert!(c.is_finite());
        assert_eq!(c.to_array(), [0.0, 0.0, 0.5, 1.0]);
    }
}
