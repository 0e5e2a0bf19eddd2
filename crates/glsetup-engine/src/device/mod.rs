//! GL device: window, context, surface, and the per-frame target.
//!
//! This module is responsible for:
//! - creating the window with a current GL context and surface
//! - the swap interval (vsync)
//! - resolving GL function pointers
//! - clearing and presenting frames

mod frame;
mod context;

pub use frame::{render_frame, FrameTarget};
pub use context::GlDevice;
