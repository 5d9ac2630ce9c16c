//! Record store implementations

pub mod http;
pub mod in_memory;

pub use http::HttpRecordStore;
pub use in_memory::{IdKind, InMemoryRecordStore};
