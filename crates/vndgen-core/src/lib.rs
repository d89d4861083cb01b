#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for vndgen function signatures.
//!
//! Three layers:
//! - **Types**: canonical spelling of C type strings (`normalize_type`)
//! - **Registry**: Khronos XML `<command>` elements to `FunctionSignature`
//! - **Catalog**: merged, name-sorted signatures with stable ordinals

mod catalog;
mod error;
mod registry;
mod signature;
pub mod types;

#[cfg(test)]
mod signature_tests;

pub use catalog::{Catalog, Source};
pub use error::ParseError;
pub use registry::parse_registry;
pub use signature::{FunctionSignature, Param};
pub use types::{normalize_type, split_declaration};

/// Result type for signature parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
