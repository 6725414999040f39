use std::process::ExitCode;

use triangle_engine::device::DiscoveryPath;
use triangle_engine::logging::{LoggingConfig, init_logging};
use triangle_engine::probe::{ProbeConfig, ProbeReport, run_probe};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = ProbeConfig::default();
    log::info!(
        "headless render check: {}x{} -> {}",
        config.width,
        config.height,
        config.output.display()
    );

    exit_code(run_probe(&config))
}

/// Logs the outcome of a run and maps it to the process exit code.
fn exit_code(outcome: anyhow::Result<ProbeReport>) -> ExitCode {
    match outcome {
        Ok(report) => {
            let via = match report.path {
                DiscoveryPath::Default => "default adapter".to_owned(),
                DiscoveryPath::Enumerated { index, count } => {
                    format!("enumerated adapter #{index} of {count}")
                }
            };
            log::info!(
                "rendered {} pixels on {} via {via}, {} GPU error(s)",
                report.pixels,
                report.adapter.name,
                report.gpu_errors
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
