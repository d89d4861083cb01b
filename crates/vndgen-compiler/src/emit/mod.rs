//! C text emission from a resolved dispatch model.
//!
//! Two artifacts are produced from the same model:
//! - the header: include guard, index enum, prototypes
//! - the source: dispatch stubs, name table, function pointer table
//!
//! Every guarded function is wrapped in the same `#if` region wherever it
//! appears, so the enum and both tables always agree on slot numbering.

mod emitter;
mod stub;


use std::fmt;
use std::str::FromStr;

pub use emitter::Emitter;

use crate::DispatchModel;

/// Which artifact to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Header,
    Source,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Self::Header),
            "source" => Ok(Self::Source),
            _ => Err(format!("unknown artifact `{s}` (expected header or source)")),
        }
    }
}

/// Render one artifact.
pub fn emit(kind: ArtifactKind, model: &DispatchModel<'_>) -> String {
    Emitter::new(model).emit(kind)
}
