//! Opt-in tracing setup for applications embedding this crate.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! stays the host's decision. Enable the `telemetry` feature for a
//! ready-made default.

/// Install a default `tracing` subscriber (env-filtered, compact format).
///
/// Returns `true` when a subscriber was installed. Returns `false` when the
/// `telemetry` feature is off or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();
        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
