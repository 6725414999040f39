use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Category of an error reported by the device.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorCode {
    NoError,
    OutOfMemory,
    Validation,
    Internal,
    Unknown,
}

impl ErrorCode {
    /// Human-readable code name, as printed in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::NoError => "NO ERROR",
            ErrorCode::OutOfMemory => "OUT_OF_MEMORY",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::Unknown => "UNKNOWN ERROR",
        }
    }

    #[allow(unreachable_patterns)]
    pub fn of(err: &wgpu::Error) -> Self {
        match err {
            wgpu::Error::OutOfMemory { .. } => ErrorCode::OutOfMemory,
            wgpu::Error::Validation { .. } => ErrorCode::Validation,
            wgpu::Error::Internal { .. } => ErrorCode::Internal,
            _ => ErrorCode::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One error captured from the device.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuError {
    pub code: ErrorCode,
    pub message: String,
}

impl GpuError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<&wgpu::Error> for GpuError {
    fn from(err: &wgpu::Error) -> Self {
        Self::new(ErrorCode::of(err), err.to_string())
    }
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.message.trim_end())
    }
}

#[derive(Debug, Default)]
struct ErrorLogInner {
    pending: Vec<GpuError>,
    total: usize,
}

/// Sink for errors the device reports outside of any error scope.
///
/// Installed as the device's uncaptured-error handler. Errors are only
/// recorded there; [`ErrorLog::check`] reports them between pipeline stages.
/// Nothing here aborts: a bad stage is logged and the next one still runs.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    inner: Arc<Mutex<ErrorLogInner>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs this log as `device`'s uncaptured-error handler.
    pub fn attach(&self, device: &wgpu::Device) {
        let log = self.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            log.record(GpuError::from(&err));
        }));
    }

    pub fn record(&self, err: GpuError) {
        let mut inner = self.lock();
        inner.total += 1;
        inner.pending.push(err);
    }

    /// Drains errors recorded since the last check and logs each one against
    /// `stage`. Returns how many were drained.
    pub fn check(&self, stage: &str) -> usize {
        let drained = std::mem::take(&mut self.lock().pending);
        for err in &drained {
            log::error!("GPU error before {stage}: {err}");
        }
        if drained.is_empty() {
            log::trace!("{stage}: {}", ErrorCode::NoError);
        }
        drained.len()
    }

    /// Errors recorded over the lifetime of the log, checked or not.
    pub fn total(&self) -> usize {
        self.lock().total
    }

    fn lock(&self) -> MutexGuard<'_, ErrorLogInner> {
        // A panicking handler must not silence later reports.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Failure to obtain any usable device.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Neither the default request nor enumeration produced an adapter.
    NoAdapter,
    /// Adapters exist but none of them produced a device.
    NoDevice { adapters: usize },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NoAdapter => write!(f, "no GPU adapter available"),
            DiscoveryError::NoDevice { adapters } => {
                write!(f, "none of the {adapters} detected adapters could create a device")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_names() {
        assert_eq!(ErrorCode::NoError.name(), "NO ERROR");
        assert_eq!(ErrorCode::OutOfMemory.name(), "OUT_OF_MEMORY");
        assert_eq!(ErrorCode::Validation.name(), "VALIDATION");
        assert_eq!(ErrorCode::Internal.name(), "INTERNAL");
        assert_eq!(ErrorCode::Unknown.to_string(), "UNKNOWN ERROR");
    }

    #[test]
    fn gpu_error_display_trims_message() {
        let err = GpuError::new(ErrorCode::Validation, "bad pipeline\n");
        assert_eq!(err.to_string(), "VALIDATION (bad pipeline)");
    }

    #[test]
    fn check_drains_pending_only() {
        let log = ErrorLog::new();
        log.record(GpuError::new(ErrorCode::Validation, "a"));
        log.record(GpuError::new(ErrorCode::OutOfMemory, "b"));

        assert_eq!(log.check("draw"), 2);
        assert_eq!(log.check("readback"), 0);
        assert_eq!(log.total(), 2);
    }

    #[test]
    fn clones_share_the_same_sink() {
        let log = ErrorLog::new();
        let handler_side = log.clone();
        handler_side.record(GpuError::new(ErrorCode::Internal, "lost"));

        assert_eq!(log.total(), 1);
        assert_eq!(log.check("device creation"), 1);
    }

    #[test]
    fn discovery_error_messages() {
        assert_eq!(DiscoveryError::NoAdapter.to_string(), "no GPU adapter available");
        assert_eq!(
            DiscoveryError::NoDevice { adapters: 2 }.to_string(),
            "none of the 2 detected adapters could create a device"
        );
    }
}
