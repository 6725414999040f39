//! GPU rendering into off-screen targets.
//!
//! Renderers record into a caller-owned encoder; the caller submits. Targets are
//! plain textures that can be copied back to the CPU.
//!
//! Convention:
//! - Geometry is given directly in NDC (+Y up).
//! - Readback rows are top-down, as wgpu lays out texture copies.

mod ctx;
mod target;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use target::{OffscreenTarget, RowPadding};
pub use triangle::TriangleRenderer;
