//! Function signatures extracted from an API description.

use crate::types::is_pointer;

/// A single function parameter: canonical type and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    /// `TYPE NAME` as written in a prototype.
    ///
    /// Pointer types are joined without a space (`const char *name`).
    pub fn declaration(&self) -> String {
        if is_pointer(&self.ty) {
            format!("{}{}", self.ty, self.name)
        } else {
            format!("{} {}", self.ty, self.name)
        }
    }
}

/// A function entry point as described by the API registry.
///
/// `ordinal` is meaningless until the signature is placed in a
/// [`Catalog`](crate::Catalog), which assigns it from name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
    pub ordinal: usize,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params,
            ordinal: 0,
        }
    }

    pub fn has_return(&self) -> bool {
        self.return_type != "void"
    }

    /// Parameter list for a declaration. Empty lists are spelled `void`.
    pub fn decl_args(&self) -> String {
        if self.params.is_empty() {
            return "void".to_string();
        }
        self.params
            .iter()
            .map(Param::declaration)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameter names, comma separated, for forwarding a call.
    pub fn call_args(&self) -> String {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Position of the parameter called `name`.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Position of the first parameter whose canonical type is one of `types`.
    pub fn param_index_by_type(&self, types: &[&str]) -> Option<usize> {
        self.params.iter().position(|p| types.contains(&p.ty.as_str()))
    }
}
