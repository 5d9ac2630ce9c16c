//! Validation and filtering system
//!
//! Each entity declares an [`EntityValidationConfig`]: a table of fields with
//! filters (trim, coercions, defaults) and validators. The extractors in
//! [`extractor`] run that table on request bodies before handlers see them.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatedCreate, ValidatedUpdate};
