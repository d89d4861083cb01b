//! Fully resolved dispatch policy.

use std::fmt;

use crate::policy::{MappingKind, Method};

/// A resolved reference to a value available inside the stub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamRef {
    /// A parameter of the function.
    Param { index: usize, name: String },
    /// A C expression copied verbatim, parentheses included.
    Raw(String),
}

impl ParamRef {
    pub fn param(index: usize, name: impl Into<String>) -> Self {
        Self::Param {
            index,
            name: name.into(),
        }
    }

    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param { name, .. } => f.write_str(name),
            Self::Raw(expr) => f.write_str(expr),
        }
    }
}

/// Protocol request opcode and error code passed to object lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Protocol {
    pub opcode: String,
    pub error: String,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            opcode: "-1".to_string(),
            error: "-1".to_string(),
        }
    }
}

/// How the stub finds its vendor, with exactly the data each lookup needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    None,
    Custom,
    Current,
    Display { key: ParamRef },
    Device { key: ParamRef },
    Screen { key: ParamRef },
    Drawable { key: ParamRef, protocol: Protocol },
    Context { key: ParamRef, protocol: Protocol },
    Config { key: ParamRef, protocol: Protocol },
}

impl Route {
    /// Policy method this route implements. `xvisinfo` reports as `screen`.
    pub fn method(&self) -> Method {
        match self {
            Self::None => Method::None,
            Self::Custom => Method::Custom,
            Self::Current => Method::Current,
            Self::Display { .. } => Method::Display,
            Self::Device { .. } => Method::Device,
            Self::Screen { .. } => Method::Screen,
            Self::Drawable { .. } => Method::Drawable,
            Self::Context { .. } => Method::Context,
            Self::Config { .. } => Method::Config,
        }
    }

    pub fn key(&self) -> Option<&ParamRef> {
        match self {
            Self::None | Self::Custom | Self::Current => None,
            Self::Display { key }
            | Self::Device { key }
            | Self::Screen { key }
            | Self::Drawable { key, .. }
            | Self::Context { key, .. }
            | Self::Config { key, .. } => Some(key),
        }
    }

    pub fn has_stub(&self) -> bool {
        self.method().has_stub()
    }

    /// The object kind this route looks up, if any.
    pub(crate) fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            Self::Drawable { .. } => Some(ObjectKind::Drawable),
            Self::Context { .. } => Some(ObjectKind::Context),
            Self::Config { .. } => Some(ObjectKind::Config),
            _ => None,
        }
    }
}

/// Objects whose vendor mapping can be forgotten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Context,
    Drawable,
    Config,
}

impl ObjectKind {
    pub(crate) fn from_mapping(kind: MappingKind) -> Option<Self> {
        match kind {
            MappingKind::Context => Some(Self::Context),
            MappingKind::Drawable => Some(Self::Drawable),
            MappingKind::Config => Some(Self::Config),
            MappingKind::ConfigList => None,
        }
    }
}

/// Mapping recorded from the returned handle after a successful call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddMapping {
    Context,
    Drawable,
    Config,
    ConfigList { count: ParamRef },
}

/// Mapping forgotten after a successful call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveMapping {
    pub kind: ObjectKind,
    pub key: ParamRef,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Linkage {
    #[default]
    Default,
    Static,
    /// Prefixed with the profile's export macro.
    Public,
}

/// Conditional compilation predicate, e.g. `defined(GLX_ARB_foo)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard(String);

impl Guard {
    pub fn defined(macro_name: &str) -> Self {
        Self(format!("defined({macro_name})"))
    }

    pub fn predicate(&self) -> &str {
        &self.0
    }
}

/// Everything the emitter needs to know about one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchPolicy {
    pub route: Route,
    /// Present exactly when the function returns a value and has a stub.
    pub default_return: Option<String>,
    pub guard: Option<Guard>,
    /// Connection expression for runtime calls; `None` means the null literal.
    pub display: Option<ParamRef>,
    pub adds_mapping: Option<AddMapping>,
    pub removes_mapping: Option<RemoveMapping>,
    pub linkage: Linkage,
    pub name_prefix: String,
    pub in_header: bool,
}

impl DispatchPolicy {
    pub fn method(&self) -> Method {
        self.route.method()
    }

    pub fn key(&self) -> Option<&ParamRef> {
        self.route.key()
    }
}
