//! Plain-text PPM (`P3`) output.
//!
//! Layout:
//! ```text
//! P3
//! <width> <height>
//! 255
//! r g b
//! r g b
//! ...
//! ```
//! One line per pixel, rows from the top of the image to the bottom.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::PixelBuffer;

/// Maximum channel value written in the header.
pub const MAX_CHANNEL_VALUE: u32 = 255;

/// Writes `pixels` to `out` as plain-text PPM.
pub fn write_ppm<W: Write>(mut out: W, pixels: &PixelBuffer) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", pixels.width(), pixels.height())?;
    writeln!(out, "{MAX_CHANNEL_VALUE}")?;

    for j in 0..pixels.height() {
        for rgb in pixels.row_top_down(j).chunks_exact(PixelBuffer::BYTES_PER_PIXEL) {
            writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
    }

    out.flush()
}

/// Creates (or truncates) `path` and writes `pixels` into it.
pub fn save_ppm(path: impl AsRef<Path>, pixels: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_ppm(BufWriter::new(file), pixels)
        .with_context(|| format!("failed to write {}", path.display()))
}
