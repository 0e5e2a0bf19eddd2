//! glsetup engine crate.
//!
//! Owns the window, the GL context and the clear-screen loop used by the
//! `glsetup` binary.

pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod time;
pub mod window;

pub use crate::core::{BootstrapError, EXIT_FAILURE, EXIT_SUCCESS};
pub use crate::window::{RunSummary, Runtime, WindowConfig};
