//! Logger initialisation for the host binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install `env_logger` as the `log` backend with millisecond timestamps.
///
/// Recognitions log at debug and every delivered frame at trace, so `verbose` (debug)
/// shows each performed move while the default (info) only shows host lifecycle.
/// `RUST_LOG` overrides both, e.g. `RUST_LOG=movewatch=trace` to follow frame timing.
/// Calling this again after a logger is installed does nothing.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_env(Env::default().default_filter_or(default_level.to_string()))
        .format_timestamp_millis()
        .try_init();
}
