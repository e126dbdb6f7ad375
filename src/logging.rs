use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for a count of `-v` flags: warn, then info, debug, trace.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr subscriber. `RUST_LOG`, when set, wins over `-v`.
///
/// Only this crate's events are shown at the chosen level; polars and
/// other dependencies stay at their defaults.
pub fn init(verbosity: u8) {
    let directive = format!("irrigation_flow={}", level_for(verbosity));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
