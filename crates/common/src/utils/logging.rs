use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a compact tracing subscriber writing to stderr.
/// - Respects `RUST_LOG` if set
/// - Falls back to `default_directive` (for example `warn` or `info,service=debug`)
/// - Writes to stderr so log lines never interleave with the menu on stdout
pub fn init_logging_default(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize a tracing subscriber with JSON structured output on stderr.
/// - Respects `RUST_LOG` if set, otherwise uses `default_directive`
/// - Includes targets so store and service events can be filtered downstream
pub fn init_logging_json(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stderr)
        .try_init();
}
