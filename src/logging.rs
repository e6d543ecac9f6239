// src/logging.rs
// =============================================================================
// Sets up `tracing` so log lines show up on stderr.
//
// RUST_LOG wins when it is set (e.g. RUST_LOG=link_trail=debug). Otherwise
// we log our own crate at info, or debug with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default = if verbose { "link_trail=debug" } else { "link_trail=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // try_init: a second call (e.g. from tests) is ignored instead of panicking
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
