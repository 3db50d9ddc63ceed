use log::LevelFilter;
use std::env;

/// Environment variable holding the log level of the binary.
pub const LOG_ENV: &str = "PGN_LOG";

fn level_from_str(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" | "err" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Installs an `env_logger` backend writing to stderr, filtered by
/// `PGN_LOG` (default `warn`). Calling it twice is harmless.
pub fn init() {
    let level = env::var(LOG_ENV)
        .map(|s| level_from_str(&s))
        .unwrap_or(LevelFilter::Warn);

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init();
}
