use std::env;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the env-yaml CLI
///
/// Logs go to stderr since stdout carries the `KEY=VALUE` lines. Honors:
/// - NO_COLOR / ENV_YAML_NO_COLOR (disables colors)
/// - FORCE_COLOR / ENV_YAML_FORCE_COLOR (colors even when stderr is piped)
/// - RUST_LOG for filtering, "warn" when unset
pub fn init_logging() {
    let use_ansi = should_use_colors();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(use_ansi)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .compact(),
        )
        .with(env_filter)
        .init();
}

fn should_use_colors() -> bool {
    colors_for(io::stderr().is_terminal())
}

fn colors_for(stderr_is_terminal: bool) -> bool {
    if env::var("NO_COLOR").is_ok() || env::var("ENV_YAML_NO_COLOR").is_ok() {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() || env::var("ENV_YAML_FORCE_COLOR").is_ok() {
        return true;
    }

    stderr_is_terminal
}
