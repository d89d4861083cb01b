//! Error taxonomy for policy loading, resolution and emission.

use vndgen_core::ParseError;

use crate::policy::{MappingKind, Method};
use crate::profile::ProfileKind;

/// Errors that can occur while turning a policy table into dispatch code.
///
/// Every variant is fatal: a run that hits one emits nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InputParse(#[from] InputError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    PolicyConsistency(#[from] ConsistencyError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::InputParse(InputError::Registry(err))
    }
}

/// Malformed input: API description, policy file, or a policy field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Registry(#[from] ParseError),

    #[error("{origin}: invalid policy file: {message}")]
    PolicyFile { origin: String, message: String },

    #[error("function {function}: invalid `{field}`: {message}")]
    PolicyField {
        function: String,
        field: &'static str,
        message: String,
    },
}

/// A name in the policy does not match anything it should refer to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("function {function}: not found in any API description")]
    MissingFunction { function: String },

    #[error("function {function}: `{field}` refers to unknown parameter `{spec}`")]
    UnknownParameter {
        function: String,
        field: &'static str,
        spec: String,
    },

    #[error("function {function}: no parameter can serve as the `{method}` key")]
    NoKeyCandidate { function: String, method: Method },

    #[error("function {function}: needs a `Display *` parameter or an explicit `display`")]
    MissingDisplay { function: String },
}

/// The policy fields contradict each other or the target profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("function {function}: can't be both static and public")]
    StaticAndPublic { function: String },

    #[error("function {function}: `{kind}` mappings can't be removed")]
    InvalidRemoval { function: String, kind: MappingKind },

    #[error(
        "function {function}: removing a `{kind}` mapping needs `remove_key` when dispatching by `{method}`"
    )]
    ImplicitRemovalKey {
        function: String,
        kind: MappingKind,
        method: Method,
    },

    #[error("function {function}: `config-list` mapping needs `count`")]
    MissingCount { function: String },

    #[error("function {function}: explicit `opcode` needs an `error` code")]
    MissingErrorCode { function: String },

    #[error("function {function}: returns void, nothing to map")]
    MappingWithoutReturn { function: String },

    #[error("function {function}: listed more than once in the policy")]
    DuplicatePolicy { function: String },

    #[error("function {function}: profile `{profile}` has no runtime entry for {entry}")]
    UnsupportedByProfile {
        function: String,
        profile: ProfileKind,
        entry: &'static str,
    },
}
