//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug`,
//! `--quiet` selects `error`, and the default is `warn`. Logs go to stderr so
//! stdout stays reserved for command output.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}
