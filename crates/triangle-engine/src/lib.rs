//! Headless triangle engine.
//!
//! Opens a wgpu device without a window or display server, draws one triangle
//! into an off-screen texture, reads it back and writes it as plain-text PPM.

pub mod device;
pub mod image;
pub mod logging;
pub mod probe;
pub mod render;
