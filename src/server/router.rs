//! Router builder utilities for item routes

use crate::core::MenuEntity;
use crate::server::handlers::{
    ProxyState, create, delete, get_item, health, list, toggle_availability, update,
};
use axum::{
    Router,
    routing::{get, patch},
};

/// Build item routes mounted at `mount_path` (e.g. `/items`)
///
/// - GET    {mount}                     - List items (query forwarded)
/// - POST   {mount}                     - Create an item
/// - GET    {mount}/{id}                - Get one item
/// - PUT    {mount}/{id}                - Update an item
/// - DELETE {mount}/{id}                - Delete an item
/// - PATCH  {mount}/{id}/availability   - Toggle availability (if supported)
pub fn build_item_routes<E: MenuEntity>(state: ProxyState, mount_path: &str) -> Router {
    let base = mount_path.trim_end_matches('/');
    let collection = if base.is_empty() { "/" } else { base };

    let mut router = Router::new()
        .route(collection, get(list).post(create::<E>))
        .route(
            &format!("{}/{{id}}", base),
            get(get_item::<E>).put(update::<E>).delete(delete::<E>),
        );

    if E::supports_availability() {
        router = router.route(
            &format!("{}/{{id}}/availability", base),
            patch(toggle_availability::<E>),
        );
    }

    router.with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
