use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr subscriber filtered to this crate at `level`.
///
/// `RUST_LOG` takes precedence when set. A second call is a no-op.
pub fn init_logging(level: &str) {
    let default_filter = format!("absence_sim={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logging: {e}");
    }
}
