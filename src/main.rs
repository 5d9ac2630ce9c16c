//! `menu-server`: validating proxy in front of a json-server record store

use menu_proxy::config::{ItemVariant, ProxyConfig};
use menu_proxy::entities::{FoodItem, MenuItem};
use menu_proxy::logging;
use menu_proxy::server::ServerBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(logging::DEFAULT_FILTER)?;

    let config = ProxyConfig::load()?;
    tracing::info!(
        "Starting menu-server (variant: {}, store: {})",
        config.variant,
        config.store_origin
    );

    match config.variant {
        ItemVariant::Menu => {
            ServerBuilder::<MenuItem>::new()
                .with_config(config)
                .serve()
                .await
        }
        ItemVariant::Food => {
            ServerBuilder::<FoodItem>::new()
                .with_config(config)
                .serve()
                .await
        }
    }
}
