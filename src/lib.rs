//! # menu-proxy
//!
//! A validating REST proxy between a restaurant menu front end and a
//! json-server style record store.
//!
//! ## Features
//!
//! - **Declarative validation**: per-entity field tables with filters and
//!   validators, reporting every invalid field at once
//! - **Form / domain shapes**: pure transforms between what a client edits
//!   and the typed record
//! - **Two variants**: the simple [`MenuItem`](entities::MenuItem) and the
//!   richer [`FoodItem`](entities::FoodItem)
//! - **Normalised failures**: store errors become a small set of JSON error
//!   bodies and are never leaked verbatim
//! - **Response checks**: records coming back from the store are validated
//!   again before reaching a client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use menu_proxy::prelude::*;
//!
//! let app = ServerBuilder::<MenuItem>::new()
//!     .with_config(ProxyConfig::load()?)
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ErrorResponse, FieldErrors, IdentifierError, MenuEntity, Operation, ProxyError,
        ProxyResult, RecordStore, StoreError, StoreOperation, StoreResult,
    };
    pub use crate::core::validation::{EntityValidationConfig, ValidatedCreate, ValidatedUpdate};

    // === Entities ===
    pub use crate::entities::{Category, FoodItem, FoodItemForm, MenuItem, MenuItemForm};

    // === Storage ===
    pub use crate::storage::{HttpRecordStore, IdKind, InMemoryRecordStore};

    // === Config ===
    pub use crate::config::{ConfigError, ItemVariant, ProxyConfig};

    // === Server ===
    pub use crate::server::{DeleteResponse, ProxyState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
