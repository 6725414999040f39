use anyhow::Result;

use super::{DiscoveryError, HeadlessInit};

/// How the device in use was found.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiscoveryPath {
    /// The instance's default adapter worked.
    Default,
    /// The default adapter was missing or failed; adapter `index` out of
    /// `count` enumerated ones was used instead.
    Enumerated { index: usize, count: usize },
}

/// Adapter plus the device/queue created from it.
pub struct Discovered {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub path: DiscoveryPath,
}

/// Finds an adapter and opens a device on it, without any surface.
///
/// The default adapter is tried first. When there is none, or it cannot open
/// a device, every adapter the instance enumerates is tried in order and the
/// first one that opens a device wins.
pub async fn discover(instance: &wgpu::Instance, init: &HeadlessInit) -> Result<Discovered> {
    match instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: None,
            force_fallback_adapter: init.force_fallback_adapter,
        })
        .await
    {
        Ok(adapter) => match open_device(&adapter, init).await {
            Ok((device, queue)) => {
                return Ok(Discovered {
                    adapter,
                    device,
                    queue,
                    path: DiscoveryPath::Default,
                });
            }
            Err(err) => log::warn!("default adapter could not create a device: {err}"),
        },
        Err(err) => log::info!("no default adapter ({err})"),
    }

    log::info!("trying to create a device from enumerated adapters");
    let adapters = instance.enumerate_adapters(init.backends).await;
    let count = adapters.len();
    log::info!("detected {count} adapters");

    if count == 0 {
        return Err(DiscoveryError::NoAdapter.into());
    }

    for (index, adapter) in adapters.into_iter().enumerate() {
        let (device, queue) = match open_device(&adapter, init).await {
            Ok(pair) => pair,
            Err(err) => {
                log::info!("  failed to initialize adapter #{index}: {err}");
                continue;
            }
        };

        log::info!("  adapter #{index} is used");
        return Ok(Discovered {
            adapter,
            device,
            queue,
            path: DiscoveryPath::Enumerated { index, count },
        });
    }

    Err(DiscoveryError::NoDevice { adapters: count }.into())
}

async fn open_device(
    adapter: &wgpu::Adapter,
    init: &HeadlessInit,
) -> std::result::Result<(wgpu::Device, wgpu::Queue), wgpu::RequestDeviceError> {
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("triangle-engine headless device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone().using_resolution(adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
}
