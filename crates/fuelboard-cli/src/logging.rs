use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "FUELBOARD_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. Stdout stays reserved for command output.
///
/// Reads `FUELBOARD_LOG` (for example `fuelboard_client=debug`) and falls back
/// to `warn` when it is unset or unparsable.
pub fn init_logging() {
    let filter = filter_from_env();
    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .with(filter)
        .try_init();

    // A subscriber set earlier (tests, embedding) keeps priority.
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
