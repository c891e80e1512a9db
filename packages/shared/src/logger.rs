//! Logger setup backed by `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the default filter directive for a binary.
///
/// The binary target, the server library and the HTTP tracing layer all log
/// at `level`. Binary names use `-`, module targets use `_`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let mut targets = vec![bin_name.replace('-', "_")];
    for target in ["hearth_server", "tower_http"] {
        if !targets.iter().any(|t| t == target) {
            targets.push(target.to_string());
        }
    }
    targets
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default directive when it is set.
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();
}
