use anyhow::{Context, Result};

use super::{DiscoveryPath, ErrorLog, HeadlessInit, discover};

/// Owns wgpu core objects for rendering without a window.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - routes device errors into an [`ErrorLog`]
///
/// There is no surface; render targets are plain textures.
pub struct HeadlessGpu {
    /// Kept alive for as long as the adapter and device are.
    _instance: wgpu::Instance,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    path: DiscoveryPath,
    errors: ErrorLog,
    target_format: wgpu::TextureFormat,
}

impl HeadlessGpu {
    /// Creates a headless context.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers without an
    /// executor wrap this in `pollster::block_on`.
    pub async fn new(init: HeadlessInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let found = discover(&instance, &init)
            .await
            .context("failed to create a headless GPU context")?;

        let errors = ErrorLog::new();
        errors.attach(&found.device);

        let gpu = Self {
            _instance: instance,
            adapter: found.adapter,
            device: found.device,
            queue: found.queue,
            path: found.path,
            errors,
            target_format: init.target_format,
        };
        gpu.log_info();
        Ok(gpu)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn path(&self) -> DiscoveryPath {
        self.path
    }

    /// Error sink attached to the device.
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// Format render targets should be created with.
    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.target_format
    }

    fn log_info(&self) {
        let info = self.adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);
        log::info!("adapter vendor: {:#06x}, device: {:#06x}", info.vendor, info.device);
        if let Some(driver) = driver_description(&info.driver, &info.driver_info) {
            log::info!("driver: {driver}");
        }
    }
}

/// Joins the driver name and version info, skipping whichever part is empty.
fn driver_description(driver: &str, driver_info: &str) -> Option<String> {
    match (driver.trim(), driver_info.trim()) {
        ("", "") => None,
        (name, "") => Some(name.to_owned()),
        ("", info) => Some(info.to_owned()),
        (name, info) => Some(format!("{name} {info}")),
    }
}

impl Drop for HeadlessGpu {
    fn drop(&mut self) {
        log::debug!("releasing headless GPU context");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_description_joins_both_parts() {
        assert_eq!(
            driver_description("llvmpipe", "Mesa 24.0").as_deref(),
            Some("llvmpipe Mesa 24.0")
        );
    }

    #[test]
    fn driver_description_skips_empty_name() {
        assert_eq!(
            driver_description("", "4.5 (Core Profile) Mesa").as_deref(),
            Some("4.5 (Core Profile) Mesa")
        );
    }

    #[test]
    fn driver_description_skips_empty_info() {
        assert_eq!(driver_description("NVIDIA", " ").as_deref(), Some("NVIDIA"));
    }

    #[test]
    fn driver_description_none_when_both_empty() {
        assert_eq!(driver_description("", ""), None);
    }
}
