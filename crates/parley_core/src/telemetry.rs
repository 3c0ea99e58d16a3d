//! Tracing subscriber setup shared by the Parley binaries.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (for example `"info"` or
/// `"parley=debug"`) is used. With `json` enabled, events are written as one JSON
/// object per line.
///
/// # Errors
///
/// Returns error if the filter is invalid or a global subscriber is already set.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
