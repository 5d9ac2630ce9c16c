//! Core module containing the traits and types shared by every entity

pub mod entity;
pub mod error;
pub mod store;
pub mod validation;

pub use entity::{MenuEntity, Operation};
pub use error::{ErrorResponse, FieldErrors, IdentifierError, ProxyError, ProxyResult, StoreOperation};
pub use store::{RecordStore, StoreError, StoreResult};
