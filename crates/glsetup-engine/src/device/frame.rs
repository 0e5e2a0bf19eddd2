use anyhow::Result;

use crate::paint::ClearColor;

/// Something a frame can be cleared into and presented from.
///
/// Implemented by [`GlDevice`](super::GlDevice); tests substitute a recorder.
pub trait FrameTarget {
    /// Clears the color buffer.
    fn clear(&mut self, color: ClearColor);

    /// Presents the back buffer. May block on vsync.
    fn present(&mut self) -> Result<()>;
}

/// Renders one empty frame: clear, then present.
pub fn render_frame<T: FrameTarget + ?Sized>(target: &mut T, clear: ClearColor) -> Result<()> {
    target.clear(clear);
    target.present()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(ClearColor),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        fail_present: bool,
    }

    impl FrameTarget for Recorder {
        fn clear(&mut self, color: ClearColor) {
            self.ops.push(Op::Clear(color));
        }

        fn present(&mut self) -> Result<()> {
            self.ops.push(Op::Present);
            anyhow::ensure!(!self.fail_present, "swap failed");
            Ok(())
        }
    }

    #[test]
    fn clears_before_presenting() {
        let mut rec = Recorder::default();
        render_frame(&mut rec, ClearColor::BOOTSTRAP).unwrap();
        assert_eq!(rec.ops, vec![Op::Clear(ClearColor::BOOTSTRAP), Op::Present]);
    }

    #[test]
    fn clear_color_is_identical_every_frame() {
        let mut rec = Recorder::default();
        for _ in 0..5 {
            render_frame(&mut rec, ClearColor::BOOTSTRAP).unwrap();
        }

        let clears: Vec<_> = rec
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Clear(c) => Some(c.to_array()),
                Op::Present => None,
            })
            .collect();

        assert_eq!(clears.len(), 5);
        assert!(clears.iter().all(|c| *c == [0.2, 0.3, 0.3, 1.0]));
    }

    #[test]
    fn present_error_is_returned() {
        let mut rec = Recorder {
            fail_present: true,
            ..Recorder::default()
        };
        let err = render_frame(&mut rec, ClearColor::BOOTSTRAP).unwrap_err();
        assert_eq!(err.to_string(), "swap failed");
        assert_eq!(rec.ops.len(), 2);
    }
}
