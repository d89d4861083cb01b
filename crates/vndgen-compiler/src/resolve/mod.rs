//! Policy resolution: fill in and validate every raw policy field.
//!
//! - `model` - the resolved policy types (`Route`, `DispatchPolicy`, ...)
//! - `returns` - key type sets and default return literals
//! - `resolver` - the per-function resolution algorithm

mod model;
mod resolver;
pub mod returns;

#[cfg(test)]
mod resolver_tests;

pub use model::{
    AddMapping, DispatchPolicy, Guard, Linkage, ObjectKind, ParamRef, Protocol, RemoveMapping,
    Route,
};
pub use resolver::{Resolver, resolve};
