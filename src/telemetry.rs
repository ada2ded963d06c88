//! Diagnostics setup.
//!
//! Installs a `tracing-subscriber` that writes to stderr so command output on
//! stdout stays clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level selected by the number of `-v` flags.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber.
///
/// Priority: `RUST_LOG` env var > `-v` count > default "warn".
///
/// # Returns
///
/// `false` when a global subscriber was already installed; that one stays
/// in charge and the request is logged to it at debug level.
pub fn init(verbosity: u8) -> bool {
    let level = level_for(verbosity);
    let default_filter = format!("{},conveyor={}", level, level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();

    match installed {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "tracing subscriber already installed");
            false
        }
    }
}
