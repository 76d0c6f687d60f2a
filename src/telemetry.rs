//! Telemetry helpers for hosts embedding `line-visual`.
//!
//! The visual only emits `tracing` events (skipped rows, domain fallbacks,
//! render summaries). Hosts either wire their own subscriber or call
//! `init_default_tracing` once at startup.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "line_visual=info";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
