//! Declarative per-function dispatch policy, as written by hand.
//!
//! A policy file has three parts:
//! - `[target]` - which profile to emit for, plus field overrides
//! - `[defaults]` - values for entries that omit `prefix`/`static`/`public`/`inheader`
//! - `[[function]]` - one raw record per dispatched function
//!
//! Records here are unresolved: keys may be missing and nothing has been
//! checked against the function's signature yet. See [`crate::resolve`].

mod table;


use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::profile::ProfileKind;

pub use table::{PolicyFormat, PolicyTable};

/// How a stub finds the vendor that owns a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Slot exists but no stub is generated.
    None,
    /// Stub body is written by hand elsewhere.
    Custom,
    /// Vendor of the current context.
    Current,
    Display,
    Device,
    Drawable,
    Context,
    Config,
    Screen,
    /// Screen taken from an `XVisualInfo *` parameter.
    #[serde(rename = "xvisinfo", alias = "visual-info")]
    VisualInfo,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Custom => "custom",
            Self::Current => "current",
            Self::Display => "display",
            Self::Device => "device",
            Self::Drawable => "drawable",
            Self::Context => "context",
            Self::Config => "config",
            Self::Screen => "screen",
            Self::VisualInfo => "xvisinfo",
        }
    }

    /// Whether a stub body is generated for this method.
    pub fn has_stub(self) -> bool {
        !matches!(self, Self::None | Self::Custom)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object class whose vendor ownership a stub records or forgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingKind {
    Context,
    Drawable,
    Config,
    /// An array of configs, paired with an element count.
    #[serde(alias = "configlist", alias = "config_list")]
    ConfigList,
}

impl MappingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Drawable => "drawable",
            Self::Config => "config",
            Self::ConfigList => "config-list",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a parameter, as written in the policy.
///
/// Strings are interpreted at resolution time: an integer selects by
/// position, `(...)` is a raw C expression, anything else is a name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    Index(usize),
    Text(String),
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<usize> for ParamSpec {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ParamSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One `[[function]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPolicy {
    pub name: String,
    pub method: Method,
    pub key: Option<ParamSpec>,
    /// Extension macro; the generated code is compiled only when it is defined.
    pub extension: Option<String>,
    /// C expression returned when no vendor handles the call.
    pub retval: Option<String>,
    pub display: Option<ParamSpec>,
    pub opcode: Option<String>,
    pub error: Option<String>,
    pub add_mapping: Option<MappingKind>,
    #[serde(alias = "nelements")]
    pub count: Option<ParamSpec>,
    pub remove_mapping: Option<MappingKind>,
    pub remove_key: Option<ParamSpec>,
    pub prefix: Option<String>,
    #[serde(rename = "static")]
    pub is_static: Option<bool>,
    pub public: Option<bool>,
    #[serde(alias = "in_header")]
    pub inheader: Option<bool>,
}

impl RawPolicy {
    /// An entry with only a name and method; every other field unset.
    pub fn new(name: impl Into<String>, method: Method) -> Self {
        Self {
            name: name.into(),
            method,
            key: None,
            extension: None,
            retval: None,
            display: None,
            opcode: None,
            error: None,
            add_mapping: None,
            count: None,
            remove_mapping: None,
            remove_key: None,
            prefix: None,
            is_static: None,
            public: None,
            inheader: None,
        }
    }
}

/// `[defaults]` table.
///
/// `static` only applies to entries that get a generated stub; `none` and
/// `custom` entries keep their own setting. An entry that sets `public = true`
/// never takes the default `static`, and the reverse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub prefix: Option<String>,
    #[serde(rename = "static")]
    pub is_static: Option<bool>,
    pub public: Option<bool>,
    #[serde(alias = "in_header")]
    pub inheader: Option<bool>,
}

impl Defaults {
    pub(crate) fn apply(&self, entry: &mut RawPolicy) {
        if entry.prefix.is_none() {
            entry.prefix.clone_from(&self.prefix);
        }
        // An explicit linkage on the entry shuts out the opposite default.
        let (explicit_static, explicit_public) = (entry.is_static, entry.public);
        if explicit_static.is_none() && explicit_public != Some(true) && entry.method.has_stub() {
            entry.is_static = self.is_static;
        }
        if explicit_public.is_none() && explicit_static != Some(true) {
            entry.public = self.public;
        }
        if entry.inheader.is_none() {
            entry.inheader = self.inheader;
        }
    }
}

/// `[target]` table: profile preset plus per-field overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    pub profile: Option<ProfileKind>,
    pub enum_prefix: Option<String>,
    pub header_guard: Option<String>,
    pub header_includes: Option<Vec<String>>,
    pub source_includes: Option<Vec<String>>,
    pub calling_convention: Option<String>,
    pub export_macro: Option<String>,
    pub vendor_type: Option<String>,
    pub function_pointer_type: Option<String>,
    pub names_table: Option<String>,
    pub functions_table: Option<String>,
    pub slot_indices: Option<String>,
    pub null_terminated_tables: Option<bool>,
    pub null_literal: Option<String>,
    #[serde(default)]
    pub runtime: RuntimeOverrides,
    /// Extra `type = "literal"` default-return entries.
    #[serde(default)]
    pub sentinels: IndexMap<String, String>,
}

/// `[target.runtime]` table: names of the runtime entry points stubs call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeOverrides {
    pub current: Option<String>,
    pub display: Option<String>,
    pub device: Option<String>,
    pub screen: Option<String>,
    pub drawable: Option<String>,
    pub context: Option<String>,
    pub config: Option<String>,
    pub fetch: Option<String>,
    pub add_context: Option<String>,
    pub add_drawable: Option<String>,
    pub add_config: Option<String>,
    pub add_config_list: Option<String>,
    pub remove_context: Option<String>,
    pub remove_drawable: Option<String>,
    pub remove_config: Option<String>,
}
