use anyhow::{Result, ensure};

/// Order in which rows are stored in a [`PixelBuffer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RowOrder {
    /// Row 0 is the top of the image (wgpu texture copies).
    TopDown,
    /// Row 0 is the bottom of the image (GL-style framebuffer reads).
    BottomUp,
}

/// Tightly packed RGB8 pixels.
///
/// Invariant: `data.len() == width * height * 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    order: RowOrder,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wraps packed RGB bytes.
    pub fn from_rgb(width: u32, height: u32, order: RowOrder, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        ensure!(
            data.len() == expected,
            "rgb buffer for {width}x{height} must be {expected} bytes, got {}",
            data.len()
        );
        Ok(Self { width, height, order, data })
    }

    /// Builds a buffer from RGBA8 rows that may carry trailing padding.
    ///
    /// Only the first `width * 4` bytes of every `padded_bytes_per_row` are
    /// read; alpha is dropped.
    pub fn from_padded_rgba(
        width: u32,
        height: u32,
        padded_bytes_per_row: usize,
        order: RowOrder,
        bytes: &[u8],
    ) -> Result<Self> {
        let unpadded = width as usize * 4;
        ensure!(
            padded_bytes_per_row >= unpadded,
            "row stride {padded_bytes_per_row} is shorter than {unpadded} bytes of pixels"
        );
        ensure!(
            bytes.len() >= padded_bytes_per_row * height as usize,
            "readback holds {} bytes, need {} rows of {padded_bytes_per_row}",
            bytes.len(),
            height
        );

        let mut data = Vec::with_capacity(width as usize * height as usize * Self::BYTES_PER_PIXEL);
        for row in bytes.chunks(padded_bytes_per_row).take(height as usize) {
            let texels: &[[u8; 4]] = bytemuck::cast_slice(&row[..unpadded]);
            for [r, g, b, _a] in texels {
                data.extend_from_slice(&[*r, *g, *b]);
            }
        }

        Self::from_rgb(width, height, order, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> RowOrder {
        self.order
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The `j`-th row counted from the top of the image, whatever the storage order.
    ///
    /// # Panics
    /// Panics if `j >= self.height()`.
    pub fn row_top_down(&self, j: u32) -> &[u8] {
        assert!(j < self.height, "row {j} out of range for height {}", self.height);
        let stored = match self.order {
            RowOrder::TopDown => j,
            RowOrder::BottomUp => self.height - 1 - j,
        };
        let stride = self.width as usize * Self::BYTES_PER_PIXEL;
        let start = stored as usize * stride;
        &self.data[start..start + stride]
    }

    /// RGB at `(x, y)` with `y` counted from the top, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.row_top_down(y);
        let i = x as usize * Self::BYTES_PER_PIXEL;
        Some([row[i], row[i + 1], row[i + 2]])
    }
}
