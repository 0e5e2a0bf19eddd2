//! Bootstrap contracts shared by the runtime and the entry point.
//!
//! `Lifecycle` holds no winit types; startup ordering and failure outcomes
//! are tested without a display server.

mod error;
mod lifecycle;

pub use error::{BootstrapError, EXIT_FAILURE, EXIT_SUCCESS};
pub use lifecycle::{Lifecycle, Phase};
