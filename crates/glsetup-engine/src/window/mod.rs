//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and drives the
//! clear-and-present loop until the window is closed.

mod config;
mod runtime;

pub use config::WindowConfig;
pub use runtime::{RunSummary, Runtime};
