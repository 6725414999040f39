use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail, ensure};

use crate::image::{PixelBuffer, RowOrder};

/// Upper bound on how long a readback waits for the GPU.
///
/// Software rasterizers can be slow, but a device that never signals the map
/// callback should not hang the probe.
const MAP_TIMEOUT: Duration = Duration::from_secs(10);

/// Row layout of a texture-to-buffer copy.
///
/// wgpu requires `bytes_per_row` to be a multiple of
/// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RowPadding {
    pub unpadded_bytes_per_row: u32,
    pub padded_bytes_per_row: u32,
}

impl RowPadding {
    pub fn new(width: u32, bytes_per_pixel: u32) -> Self {
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let padded_bytes_per_row =
            wgpu::util::align_to(unpadded_bytes_per_row, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        Self {
            unpadded_bytes_per_row,
            padded_bytes_per_row,
        }
    }
}

/// Color texture rendered into instead of a window, plus its readback path.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    /// Creates a `width` x `height` render target.
    ///
    /// Only 8-bit RGBA formats are accepted; readback assumes that layout.
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        ensure!(width > 0 && height > 0, "off-screen target has zero size ({width}x{height})");
        if !matches!(
            format,
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb
        ) {
            bail!("unsupported off-screen format {format:?}; expected Rgba8Unorm(Srgb)");
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("triangle-engine offscreen target"),
            size: Self::extent(width, height),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            width,
            height,
        })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.texture.format()
    }

    /// Copies the target back to the CPU.
    ///
    /// Blocks until the copy has landed. The returned buffer is top-down RGB.
    pub fn read_pixels(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<PixelBuffer> {
        let padding = RowPadding::new(self.width, 4);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("triangle-engine readback buffer"),
            size: padding.padded_bytes_per_row as u64 * self.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("triangle-engine readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            self.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padding.padded_bytes_per_row),
                    rows_per_image: None,
                },
            },
            Self::extent(self.width, self.height),
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            drop(tx.send(result));
        });
        wait_for_map(device, &rx)?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            PixelBuffer::from_padded_rgba(
                self.width,
                self.height,
                padding.padded_bytes_per_row as usize,
                RowOrder::TopDown,
                &mapped,
            )
        };
        buffer.unmap();
        pixels
    }

    fn extent(width: u32, height: u32) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        }
    }
}

/// Polls `device` until the map callback reports back or [`MAP_TIMEOUT`] passes.
fn wait_for_map(
    device: &wgpu::Device,
    rx: &mpsc::Receiver<std::result::Result<(), wgpu::BufferAsyncError>>,
) -> Result<()> {
    let deadline = Instant::now() + MAP_TIMEOUT;
    loop {
        device.poll(wgpu::PollType::Poll).context("device poll failed during readback")?;

        match rx.try_recv() {
            Ok(result) => return result.context("failed to map readback buffer"),
            Err(mpsc::TryRecvError::Disconnected) => {
                return Err(anyhow!("readback map callback dropped without a result"));
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }

        if Instant::now() >= deadline {
            bail!("timed out after {MAP_TIMEOUT:?} waiting for readback");
        }
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_up_to_copy_alignment() {
        let p = RowPadding::new(800, 4);
        assert_eq!(p.unpadded_bytes_per_row, 3200);
        assert_eq!(p.padded_bytes_per_row, 3328);
        assert_eq!(p.padded_bytes_per_row % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
    }

    #[test]
    fn aligned_rows_are_not_padded() {
        let p = RowPadding::new(64, 4);
        assert_eq!(p.padded_bytes_per_row, p.unpadded_bytes_per_row);
    }

    #[test]
    fn single_pixel_row_pads_to_alignment() {
        let p = RowPadding::new(1, 4);
        assert_eq!(p.unpadded_bytes_per_row, 4);
        assert_eq!(p.padded_bytes_per_row, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
    }
}
