use std::path::PathBuf;

use crate::device::HeadlessInit;

/// Parameters of a probe run.
///
/// Fixed at build time; the probe takes no flags.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Off-screen target size in pixels.
    pub width: u32,
    pub height: u32,

    /// Where the plain-text image is written.
    pub output: PathBuf,

    /// Color the target is cleared to before drawing.
    pub clear_color: wgpu::Color,

    pub gpu: HeadlessInit,
}

impl ProbeConfig {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const DEFAULT_OUTPUT: &'static str = "image.ppm";
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
            clear_color: wgpu::Color::BLACK,
            gpu: HeadlessInit::default(),
        }
    }
}
