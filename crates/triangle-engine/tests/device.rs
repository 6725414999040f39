use triangle_engine::device::{DiscoveryError, HeadlessGpu, HeadlessInit};
use triangle_engine::probe::{ProbeConfig, run_probe};
use triangle_engine::render::{OffscreenTarget, RenderCtx, RenderTarget, TriangleRenderer};

/// Opens a device on whatever adapter the machine has, or `None` if there is none.
fn open_gpu() -> Option<HeadlessGpu> {
    match pollster::block_on(HeadlessGpu::new(HeadlessInit::default())) {
        Ok(gpu) => Some(gpu),
        Err(err) if err.downcast_ref::<DiscoveryError>().is_some() => {
            eprintln!("skipping device test: {err:#}");
            None
        }
        Err(err) => panic!("device creation failed: {err:#}"),
    }
}

#[test]
fn device_error_is_drained_and_rendering_continues() {
    let Some(gpu) = open_gpu() else { return };
    gpu.errors().check("device creation");
    let before = gpu.errors().total();

    // MAP_READ and MAP_WRITE together are rejected by validation.
    let _invalid = gpu.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some("invalid map usage"),
        size: 256,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::MAP_WRITE,
        mapped_at_creation: false,
    });

    assert_eq!(gpu.errors().check("invalid buffer"), 1);
    assert_eq!(gpu.errors().total(), before + 1);
    assert_eq!(gpu.errors().check("invalid buffer"), 0);

    // Later stages still run on the same device.
    let target = OffscreenTarget::new(gpu.device(), 8, 8, gpu.target_format()).unwrap();
    let ctx = RenderCtx::new(gpu.device(), target.format(), target.width(), target.height());
    let renderer = TriangleRenderer::new(&ctx);

    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
        let mut rt = RenderTarget::new(&mut encoder, target.view());
        renderer.render(&ctx, &mut rt, wgpu::Color::BLACK);
    }
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let pixels = target.read_pixels(gpu.device(), gpu.queue()).unwrap();
    assert_eq!(pixels.pixel_count(), 64);
    assert_eq!(gpu.errors().check("readback"), 0);
    assert_eq!(gpu.errors().total(), before + 1);
}

#[test]
fn no_backends_reports_typed_no_adapter() {
    let init = HeadlessInit {
        backends: wgpu::Backends::empty(),
        ..HeadlessInit::default()
    };

    let err = match pollster::block_on(HeadlessGpu::new(init)) {
        Ok(_) => panic!("a device was created with no backends enabled"),
        Err(err) => err,
    };

    assert!(
        matches!(err.downcast_ref::<DiscoveryError>(), Some(DiscoveryError::NoAdapter)),
        "unexpected error: {err:#}"
    );
    assert!(format!("{err:#}").contains("no GPU adapter available"));
}

#[test]
fn run_without_adapter_fails_before_writing() {
    let output = std::env::temp_dir().join(format!("triangle-no-adapter-{}.ppm", std::process::id()));
    let config = ProbeConfig {
        output: output.clone(),
        gpu: HeadlessInit {
            backends: wgpu::Backends::empty(),
            ..HeadlessInit::default()
        },
        ..ProbeConfig::default()
    };

    let err = run_probe(&config).unwrap_err();

    assert!(matches!(err.downcast_ref::<DiscoveryError>(), Some(DiscoveryError::NoAdapter)));
    assert!(!output.exists());
}
