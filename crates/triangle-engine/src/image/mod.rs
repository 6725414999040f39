//! CPU-side pixel buffers and the plain-text image writer.

mod pixels;
mod ppm;

pub use pixels::{PixelBuffer, RowOrder};
pub use ppm::{MAX_CHANNEL_VALUE, save_ppm, write_ppm};
