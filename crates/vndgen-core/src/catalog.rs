//! Merged, name-ordered signature catalog.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{FunctionSignature, ParseError, parse_registry};

/// One API description document.
#[derive(Clone, Copy, Debug)]
pub struct Source<'a> {
    /// Display name for diagnostics, usually a path.
    pub origin: &'a str,
    pub text: &'a str,
}

impl<'a> Source<'a> {
    pub fn new(origin: &'a str, text: &'a str) -> Self {
        Self { origin, text }
    }
}

/// All known function signatures, sorted by name.
///
/// Iteration order, `get` results and each signature's `ordinal` agree:
/// the signature at position `i` has `ordinal == i`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    functions: IndexMap<String, FunctionSignature>,
}

impl Catalog {
    /// Parse and merge registry sources in order.
    pub fn load<'a>(sources: impl IntoIterator<Item = Source<'a>>) -> Result<Self, ParseError> {
        let mut all = Vec::new();
        for source in sources {
            all.extend(parse_registry(source.origin, source.text)?);
        }
        Ok(Self::from_signatures(all))
    }

    /// Build a catalog from already-parsed signatures.
    ///
    /// When a name repeats, the later signature replaces the earlier one.
    pub fn from_signatures(signatures: impl IntoIterator<Item = FunctionSignature>) -> Self {
        let mut functions: IndexMap<String, FunctionSignature> = IndexMap::new();
        for func in signatures {
            match functions.entry(func.name.clone()) {
                Entry::Occupied(mut e) => {
                    tracing::warn!(function = %func.name, "duplicate definition, later one wins");
                    e.insert(func);
                }
                Entry::Vacant(e) => {
                    e.insert(func);
                }
            }
        }

        functions.sort_unstable_keys();
        for (ordinal, func) in functions.values_mut().enumerate() {
            func.ordinal = ordinal;
        }

        Self { functions }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Signatures in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.values()
    }
}
