//! Log subscriber setup
//!
//! Events go to stderr so stdout stays clean for command output.
//! `RUST_LOG` takes precedence over the verbosity flags.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::GlobalOpts;

/// Level implied by the global verbosity flags
pub fn level_for(global: &GlobalOpts) -> LevelFilter {
    if global.quiet {
        return LevelFilter::ERROR;
    }
    match global.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber
///
/// A second call is a no-op.
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(global).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
