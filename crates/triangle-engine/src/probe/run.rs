use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::device::{DiscoveryPath, HeadlessGpu};
use crate::image::save_ppm;
use crate::render::{OffscreenTarget, RenderCtx, RenderTarget, TriangleRenderer};

use super::ProbeConfig;

/// Outcome of a successful probe run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub adapter: wgpu::AdapterInfo,
    pub path: DiscoveryPath,
    /// Errors the device reported along the way. None of them stop the run.
    pub gpu_errors: usize,
    pub output: PathBuf,
    pub pixels: usize,
}

/// Renders the triangle without a window and writes it to `config.output`.
///
/// Device errors are logged between stages and otherwise ignored; only failing
/// to get a device, read the pixels back or write the file is fatal.
pub fn run_probe(config: &ProbeConfig) -> Result<ProbeReport> {
    let gpu = pollster::block_on(HeadlessGpu::new(config.gpu.clone()))?;
    gpu.errors().check("device creation");

    let target = OffscreenTarget::new(gpu.device(), config.width, config.height, gpu.target_format())
        .context("failed to create off-screen target")?;
    gpu.errors().check("target creation");

    let ctx = RenderCtx::new(gpu.device(), target.format(), target.width(), target.height());
    let renderer = TriangleRenderer::new(&ctx);
    gpu.errors().check("pipeline creation");

    let mut encoder = gpu.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("triangle frame encoder"),
    });
    {
        let mut rt = RenderTarget::new(&mut encoder, target.view());
        renderer.render(&ctx, &mut rt, config.clear_color);
    }
    gpu.queue().submit(std::iter::once(encoder.finish()));
    gpu.errors().check("draw");

    let pixels = target
        .read_pixels(gpu.device(), gpu.queue())
        .context("failed to read back the rendered image")?;
    gpu.errors().check("readback");

    save_ppm(&config.output, &pixels)?;
    log::info!("saved to file: {}", config.output.display());

    Ok(ProbeReport {
        adapter: gpu.adapter_info(),
        path: gpu.path(),
        gpu_errors: gpu.errors().total(),
        output: config.output.clone(),
        pixels: pixels.pixel_count(),
    })
}
