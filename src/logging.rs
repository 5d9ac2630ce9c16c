//! Tracing subscriber setup for the server binary

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "menu_proxy=info,tower_http=info";

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_filter`. Fails if a subscriber is
/// already installed.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
