//! Diagnostic logging setup.
//!
//! Events go to stderr through `tracing-subscriber`. The filter comes from
//! `DECLMERGE_LOG` (env-filter syntax) when set, otherwise from the verbose flag.

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV_VAR: &str = "DECLMERGE_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "declmerge=debug" } else { "warn" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let subscriber = fmt::fmt()
            .with_env_filter(filter)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .compact()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
