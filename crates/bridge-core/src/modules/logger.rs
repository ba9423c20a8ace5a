//! Logging initialisation.
//!
//! `RUST_LOG` takes precedence over the level passed by the caller.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Returns `false` when a subscriber was already installed (for example by a
/// host process or a previous call); the existing one is left in place.
pub fn init_logger(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("[Logger] Subscriber installed (default level: {})", default_level);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::init_logger;

    #[test]
    fn test_second_init_is_noop() {
        let _ = init_logger("debug");
        assert!(!init_logger("info"));
    }
}
