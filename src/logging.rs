//! Logging setup for the `seqrank` binary
//!
//! Human-readable output goes to stderr so ranked results on stdout stay
//! pipeable. `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directive for a given number of `-v` flags
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "seqrank=debug,warn",
        _ => "seqrank=trace,debug",
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second install is skipped and traced.
/// Returns whether this call installed the subscriber.
pub fn init(verbosity: u8) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    if let Err(e) = tracing_subscriber::registry().with(env_filter).with(stderr_layer).try_init() {
        tracing::trace!(error = %e, "Subscriber already installed, keeping it");
        return false;
    }

    tracing::debug!(verbosity, "Logging initialized");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).contains("seqrank=debug"));
        assert!(default_directive(5).contains("seqrank=trace"));
    }

    #[test]
    fn test_init_twice() {
        init(0);
        assert!(!init(2), "second install must be skipped");
    }
}
