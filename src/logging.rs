//! Logger setup for the spekt CLI.
//!
//! Messages go to stderr prefixed with the time elapsed since startup, so
//! long streaming runs show flush and progress events against wall clock.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize the global logger.
///
/// Verbose runs log at Info, quiet runs at Warn; either can be overridden
/// through the standard `RUST_LOG` environment variable. Output format:
/// `[HH:MM:SS] LEVEL: message`, always on stderr so sketch streaming on
/// stdout stays machine readable.
pub fn init_logger(verbose: bool) {
    let start = *START_TIME.get_or_init(Instant::now);

    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(move |buf, record| {
            let secs = start.elapsed().as_secs();
            writeln!(
                buf,
                "[{:02}:{:02}:{:02}] {}: {}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}
