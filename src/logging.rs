use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Pick the default log level, falling back to `info` for unknown names.
pub fn default_level(level: &str) -> &str {
    let level = level.trim();
    if LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        level
    } else {
        "info"
    }
}

/// Install the global subscriber. Logs go to stderr; `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) {
    let chosen = default_level(level);

    let filter = EnvFilter::builder()
        .with_default_directive(
            chosen
                .to_ascii_lowercase()
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();

    if chosen != level.trim() {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }
}
