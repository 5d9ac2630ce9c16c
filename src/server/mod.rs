//! Server module for building the proxy HTTP server
//!
//! The `ServerBuilder` wires one entity variant to a record store and
//! registers:
//! - CRUD routes for the items at the configured mount path
//! - The availability toggle for variants that support it
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{DeleteResponse, ProxyState};
pub use router::{build_item_routes, health_routes};
