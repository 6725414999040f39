/// Initialization parameters for the headless GPU layer.
///
/// There is no surface, so unlike a windowed setup the target format is chosen
/// here rather than negotiated with a swapchain.
#[derive(Debug, Clone)]
pub struct HeadlessInit {
    /// Backends the instance may use. Vulkan and GL (through EGL) are the ones
    /// that work without a display server on Linux.
    pub backends: wgpu::Backends,

    /// Preference passed when requesting the default adapter.
    pub power_preference: wgpu::PowerPreference,

    /// Ask for a software adapter when requesting the default adapter.
    pub force_fallback_adapter: bool,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the device, clamped to the adapter's resolution limits.
    ///
    /// Downlevel WebGL2 limits keep GL-only and software drivers usable.
    pub required_limits: wgpu::Limits,

    /// Format of the off-screen color target.
    ///
    /// Non-sRGB so the shader's vertex colors land in the readback unchanged.
    pub target_format: wgpu::TextureFormat,
}

impl Default for HeadlessInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            target_format: wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}
