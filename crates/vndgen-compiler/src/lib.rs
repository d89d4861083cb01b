//! vndgen compiler: policy table, resolver and C emitter.
//!
//! This crate turns a signature catalog and a hand-written dispatch policy
//! into vendor dispatch stubs:
//! - `policy` - raw policy records and the policy file loader
//! - `resolve` - per-function key, default return and mapping resolution
//! - `profile` - naming of runtime entry points, tables and guards
//! - `model` - resolved functions in slot order
//! - `emit` - header and source text
//! - `generator` - high-level facade tying the steps together

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod emit;
mod error;
pub mod generator;
pub mod model;
pub mod policy;
pub mod profile;
pub mod resolve;

#[cfg(test)]
pub mod test_utils;


pub use emit::{ArtifactKind, emit};
pub use error::{ConsistencyError, Error, InputError, ReferenceError};
pub use generator::Generator;
pub use model::{DispatchModel, ResolvedFunction};
pub use policy::{PolicyFormat, PolicyTable, RawPolicy};
pub use profile::{Profile, ProfileKind};
pub use resolve::{DispatchPolicy, resolve};

/// Result type for policy resolution and emission.
pub type Result<T> = std::result::Result<T, Error>;
