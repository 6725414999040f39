//! The headless render check: one context, one triangle, one file.

mod config;
mod run;

pub use config::ProbeConfig;
pub use run::{ProbeReport, run_probe};
