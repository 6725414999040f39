//! Headless GPU device management.
//!
//! This module is responsible for:
//! - finding an adapter without a display server (default first, then enumeration)
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - naming and logging the errors the device reports

mod discovery;
mod error;
mod gpu;
mod init;

pub use discovery::{Discovered, DiscoveryPath, discover};
pub use error::{DiscoveryError, ErrorCode, ErrorLog, GpuError};
pub use gpu::HeadlessGpu;
pub use init::HeadlessInit;
