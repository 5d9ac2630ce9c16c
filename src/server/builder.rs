//! ServerBuilder for fluent API to build the proxy server

use super::handlers::ProxyState;
use super::router::{build_item_routes, health_routes};
use crate::config::ProxyConfig;
use crate::core::{MenuEntity, RecordStore};
use crate::storage::HttpRecordStore;
use anyhow::Result;
use axum::Router;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the proxy router of one entity variant
///
/// # Example
///
/// ```ignore
/// ServerBuilder::<MenuItem>::new()
///     .with_config(ProxyConfig::load()?)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder<E: MenuEntity> {
    config: ProxyConfig,
    store: Option<Arc<dyn RecordStore>>,
    custom_routes: Vec<Router>,
    _entity: PhantomData<E>,
}

impl<E: MenuEntity> ServerBuilder<E> {
    pub fn new() -> Self {
        Self {
            config: ProxyConfig::default(),
            store: None,
            custom_routes: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this store instead of the HTTP store derived from the config
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_shared_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Add routes that don't fit the item CRUD pattern
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Item routes at the configured mount path
    /// - Health routes
    /// - Any custom routes
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let store: Arc<dyn RecordStore> = match self.store {
            Some(store) => store,
            None => Arc::new(HttpRecordStore::from_config::<E>(&self.config)?),
        };

        let mut app = health_routes().merge(build_item_routes::<E>(
            ProxyState::new(store),
            &self.config.mount_path,
        ));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        let app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
        if self.config.cors_allow_any {
            return Ok(app.layer(CorsLayer::permissive()));
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured address and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr.clone();
        let origin = self.config.store_origin.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            entity = E::display_name(),
            store = %origin,
            "Server listening on {}",
            addr
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl<E: MenuEntity> Default for ServerBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
