//! Color values handed to the GL device.

mod color;

pub use color::ClearColor;
